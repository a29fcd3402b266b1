use crate::server::{
    data::participant::ParticipantRepository, model::participation::ParticipationStatus,
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod get_by_event;
mod transitions;
