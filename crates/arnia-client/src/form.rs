//! Multipart form assembly.
//!
//! The field names and the service-account fields are backend contract
//! values and must be reproduced byte-for-byte. The form is kept as an
//! inspectable list of fields plus the file part until the moment it is
//! handed to the HTTP layer, so field contents can be asserted without a
//! server.

use crate::timefmt;
use anyhow::{Context, Result};
use arnia_core::filename::guess_mime_type;
use arnia_core::UploadContext;

/// Service-account credentials sent with every submission.
#[derive(Clone, Debug)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// The photo bytes plus everything the multipart encoder needs for the part.
#[derive(Clone, Debug)]
pub struct FilePart {
    /// Backend field name, always `files[]`.
    pub name: &'static str,
    pub file_name: String,
    pub mime: &'static str,
    pub data: Vec<u8>,
}

/// Fully-resolved multipart submission. Immutable once built; exists only
/// for the duration of one HTTP exchange.
#[derive(Clone, Debug)]
pub struct PhotoForm {
    pub fields: Vec<(&'static str, String)>,
    pub file: FilePart,
}

impl PhotoForm {
    /// Assemble the exact field set the backend expects.
    pub fn build(
        credentials: &Credentials,
        gps: &str,
        context: &UploadContext,
        file_name: String,
        data: Vec<u8>,
    ) -> Self {
        let captured = &context.captured_at;

        let mut fields: Vec<(&'static str, String)> = vec![
            ("username", credentials.username.clone()),
            ("password", credentials.password.clone()),
        ];

        // Omitted entirely when no hive is selected; the backend tolerates
        // the incomplete record.
        if let Some(id) = &context.arnia_id {
            fields.push(("arniaId", id.clone()));
        }

        fields.push(("note", timefmt::format_note(captured)));
        fields.push(("ScaleforConta", format!("{:.2}", context.scale_factor)));
        fields.push(("timestamp", timefmt::format_timestamp_utc(captured)));
        fields.push(("GPS", gps.to_string()));
        fields.push(("NumeroGGPermanenza", context.days_of_stay.to_string()));
        fields.push(("data_prelievo_data", timefmt::format_date(captured)));
        fields.push(("data_prelievo_time", timefmt::format_time(captured)));
        fields.push(("tipo_misura", context.measurement_type.as_str().to_string()));

        let mime = guess_mime_type(&file_name);
        PhotoForm {
            fields,
            file: FilePart {
                name: "files[]",
                file_name,
                mime,
                data,
            },
        }
    }

    /// Look up a form field by name.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Field list with the credential values masked, for dry-run display.
    pub fn redacted_fields(&self) -> Vec<(&'static str, String)> {
        self.fields
            .iter()
            .map(|(name, value)| match *name {
                "username" | "password" => (*name, "<redacted>".to_string()),
                _ => (*name, value.clone()),
            })
            .collect()
    }

    /// Convert into the encoder's form; the boundary is auto-generated.
    pub fn into_multipart(self) -> Result<reqwest::multipart::Form> {
        let mut form = reqwest::multipart::Form::new();
        for (name, value) in self.fields {
            form = form.text(name, value);
        }

        let part = reqwest::multipart::Part::bytes(self.file.data)
            .file_name(self.file.file_name)
            .mime_str(self.file.mime)
            .context("Invalid MIME type for file part")?;

        Ok(form.part(self.file.name, part))
    }
}
