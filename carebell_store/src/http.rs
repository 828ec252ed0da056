mod model;

use async_trait::async_trait;
use reqwest::Response;
use serde::Serialize;
use url::Url;

use carebell_models::{
    reminder::{Reminder, ReminderId, ReminderStatus},
    user::PatientId,
};

use crate::reminder_store::{ReminderStore, StoreError};
use model::{ListRemindersResponse, ReminderRow, StatusResponse};

const UPDATE_STATUS_ENDPOINT: &str = "update_reminder_status.php";
const LIST_REMINDERS_ENDPOINT: &str = "get_reminders.php";

#[derive(Serialize)]
struct StatusUpdateForm<'a> {
    reminder_id: ReminderId,
    status: &'a str,
}

/// Client for the PHP backend that owns reminder records.
///
/// Uses reqwest's default timeouts and never retries.
pub struct HttpReminderStore {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpReminderStore {
    pub fn new(base_url: &str) -> Result<Self, StoreError> {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Result<Self, StoreError> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, name: &str) -> Result<Url, StoreError> {
        Ok(self.base_url.join(name)?)
    }
}

#[async_trait]
impl ReminderStore for HttpReminderStore {
    async fn update_status(
        &self,
        reminder_id: ReminderId,
        status: ReminderStatus,
    ) -> Result<(), StoreError> {
        let url = self.endpoint(UPDATE_STATUS_ENDPOINT)?;
        let form = StatusUpdateForm {
            reminder_id,
            status: status.as_str(),
        };

        let response = self.client.post(url).form(&form).send().await?;
        let body: StatusResponse = check_status(response)?.json().await?;

        if !body.success {
            return Err(rejected(body.message, "status update was not accepted"));
        }

        log::info!(
            "Reminder status updated. [reminder_id = {}, status = {}]",
            reminder_id,
            status
        );

        Ok(())
    }

    async fn list_reminders(&self, patient_id: PatientId) -> Result<Vec<Reminder>, StoreError> {
        let url = self.endpoint(LIST_REMINDERS_ENDPOINT)?;

        let response = self
            .client
            .get(url)
            .query(&[("patient_id", patient_id)])
            .send()
            .await?;
        let body: ListRemindersResponse = check_status(response)?.json().await?;

        if !body.success {
            return Err(rejected(body.message, "reminder listing was not accepted"));
        }

        let reminders = body
            .reminders
            .into_iter()
            .filter_map(|raw| match ReminderRow::parse(raw) {
                Ok(reminder) => Some(reminder),
                Err(error) => {
                    log::warn!(
                        "Skipping malformed reminder row. [patient_id = {}, error = {}]",
                        patient_id,
                        error
                    );
                    None
                }
            })
            .collect();

        Ok(reminders)
    }
}

fn rejected(message: Option<String>, fallback: &str) -> StoreError {
    StoreError::Rejected(message.unwrap_or_else(|| fallback.to_owned()))
}

fn check_status(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(StoreError::Status(status))
    }
}
