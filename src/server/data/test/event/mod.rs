use crate::server::{
    data::{event::EventRepository, participant::ParticipantRepository},
    model::event::SaveEventParam,
};
use chrono::{Duration, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod crud;
mod participant_counts;
