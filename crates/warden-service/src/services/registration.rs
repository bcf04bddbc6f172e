//! Registration ingestion service
//!
//! Parses free-text registration messages against one anchored template
//! and appends novel submissions to the configured sheet. The dispatcher
//! handles the user-facing reply and message removal on rejection.

use std::sync::OnceLock;

use regex::Regex;
use tracing::{info, instrument};

use warden_core::{DomainError, RegistrationEntry, SheetError};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// The four-field template: profession, level, power, available time
fn template() -> &'static Regex {
    static TEMPLATE: OnceLock<Regex> = OnceLock::new();
    TEMPLATE.get_or_init(|| {
        Regex::new(
            r"(?i)^\s*profession\s*[:=]\s*(\S+)\s+level\s*[:=]\s*(\d+)\s+power\s*[:=]\s*(\d+)\s+time\s*[:=]\s*(\S.*?)\s*$",
        )
        .expect("registration template must compile")
    })
}

/// Registration ingestion service
pub struct RegistrationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RegistrationService<'a> {
    /// Create a new RegistrationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Parse a message body into a registration entry
    pub fn parse(display_name: &str, body: &str) -> Result<RegistrationEntry, DomainError> {
        let caps = template()
            .captures(body)
            .ok_or(DomainError::MalformedRegistration)?;

        let level = caps[2]
            .parse()
            .map_err(|_| DomainError::MalformedRegistration)?;
        let power = caps[3]
            .parse()
            .map_err(|_| DomainError::MalformedRegistration)?;

        Ok(RegistrationEntry {
            display_name: display_name.to_string(),
            profession: caps[1].to_string(),
            level,
            power,
            available_time: caps[4].to_string(),
        })
    }

    /// Ingest a registration message: parse, dedupe, append
    #[instrument(skip(self, body))]
    pub async fn ingest(
        &self,
        display_name: &str,
        body: &str,
    ) -> ServiceResult<RegistrationEntry> {
        let sheet = self
            .ctx
            .sheet()
            .ok_or_else(|| ServiceError::internal("registration sheet not configured"))?;

        let entry = Self::parse(display_name, body)?;

        let names = sheet.column(0).await.map_err(sheet_error)?;
        if names.iter().any(|n| n == display_name) {
            return Err(DomainError::DuplicateRegistration(display_name.to_string()).into());
        }

        sheet.append_row(entry.to_row()).await.map_err(sheet_error)?;

        info!(display_name, profession = %entry.profession, "Registration stored");

        Ok(entry)
    }

    /// Number of stored registrations
    #[instrument(skip(self))]
    pub async fn stats(&self) -> ServiceResult<usize> {
        let sheet = self
            .ctx
            .sheet()
            .ok_or_else(|| ServiceError::internal("registration sheet not configured"))?;
        sheet.row_count().await.map_err(sheet_error)
    }
}

fn sheet_error(err: SheetError) -> ServiceError {
    ServiceError::internal(err.to_string())
}
