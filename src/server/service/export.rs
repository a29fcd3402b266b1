//! Spreadsheet export of event participants.

use rust_xlsxwriter::{Format, Workbook};
use sea_orm::DatabaseConnection;

use crate::server::{
    error::AppError,
    model::participation::Participant,
    service::event::EventService,
};

/// MIME type of the generated workbook.
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const HEADERS: [(&str, f64); 7] = [
    ("Login", 18.0),
    ("Name", 30.0),
    ("Class", 8.0),
    ("Status", 12.0),
    ("Points awarded", 15.0),
    ("Registered at", 20.0),
    ("Confirmed at", 20.0),
];

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Generated workbook and the file name to offer it under.
pub struct ParticipantExport {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

pub struct ExportService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ExportService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Builds the participant list of an event as an XLSX workbook.
    ///
    /// # Returns
    /// - `Ok(ParticipantExport)` - Workbook bytes with one row per participant
    /// - `Err(AppError::NotFound)` - Event does not exist
    /// - `Err(AppError::ExportErr)` - Workbook generation failed
    pub async fn participants(&self, event_id: i32) -> Result<ParticipantExport, AppError> {
        let service = EventService::new(self.db);

        let event = service.get(event_id, true).await?.event;
        let participants = service.participants(event_id).await?;

        let bytes = build_workbook(&participants)?;

        tracing::debug!(
            "Exported {} participants of event {}",
            participants.len(),
            event_id
        );

        Ok(ParticipantExport {
            file_name: format!("participants_event_{}.xlsx", event.id),
            bytes,
        })
    }
}

/// Writes a header row followed by one row per participant.
pub fn build_workbook(participants: &[Participant]) -> Result<Vec<u8>, AppError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Participants")?;

        for (col, (title, width)) in HEADERS.iter().enumerate() {
            let col = col as u16;
            sheet.write_string_with_format(0, col, *title, &header)?;
            sheet.set_column_width(col, *width)?;
        }

        for (index, participant) in participants.iter().enumerate() {
            let row = index as u32 + 1;
            let participation = &participant.participation;

            sheet.write_string(row, 0, &participant.login)?;
            sheet.write_string(row, 1, &participant.name)?;
            sheet.write_string(row, 2, participant.class_label())?;
            sheet.write_string(row, 3, participation.status.as_str())?;
            sheet.write_number(row, 4, participation.points_awarded as f64)?;
            sheet.write_string(
                row,
                5,
                participation.registered_at.format(DATE_FORMAT).to_string(),
            )?;
            if let Some(confirmed_at) = participation.confirmed_at {
                sheet.write_string(row, 6, confirmed_at.format(DATE_FORMAT).to_string())?;
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}
