use crate::error::Result;
use crate::notify::Notifier;
use crate::service::Backend;
use crate::session::Session;
use crate::types::{DataPreferences, OrganizationSettings, UserSettings};
use std::sync::Arc;
use tracing::error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettingsTab {
    #[default]
    Account,
    Organization,
    Data,
}

/// Editable settings forms. Seeded from the session when opened; saving
/// goes to the backend, which accepts and forgets.
pub struct SettingsPage {
    backend: Arc<dyn Backend>,
    pub tab: SettingsTab,
    pub account: UserSettings,
    pub org_name: String,
    pub org_industry: String,
    pub org_description: String,
    pub data: DataPreferences,
}

impl SettingsPage {
    pub fn new(backend: Arc<dyn Backend>, session: &Session) -> Self {
        let (name, email) = session
            .user()
            .map(|u| (u.name.clone(), u.email.clone()))
            .unwrap_or_default();
        Self {
            backend,
            tab: SettingsTab::default(),
            account: UserSettings {
                name,
                email,
                notifications: true,
                weekly_reports: true,
            },
            org_name: session
                .active_profile()
                .map(|p| p.name.clone())
                .unwrap_or_default(),
            org_industry: "technology".into(),
            org_description: String::new(),
            data: DataPreferences::default(),
        }
    }

    pub async fn save_account(&self, notifier: &mut Notifier) -> bool {
        let result = self.backend.update_user_settings(&self.account).await;
        report(notifier, result, "User settings saved successfully", "user settings")
    }

    pub async fn save_organization(&self, notifier: &mut Notifier) -> bool {
        let settings = OrganizationSettings {
            name: Some(self.org_name.clone()),
            industry: Some(self.org_industry.clone()),
            description: Some(self.org_description.clone()),
            data_preferences: None,
        };
        let result = self.backend.update_organization_settings(&settings).await;
        report(
            notifier,
            result,
            "Organization settings saved successfully",
            "organization settings",
        )
    }

    pub async fn save_data_preferences(&self, notifier: &mut Notifier) -> bool {
        let settings = OrganizationSettings {
            data_preferences: Some(self.data.clone()),
            ..Default::default()
        };
        let result = self.backend.update_organization_settings(&settings).await;
        report(
            notifier,
            result,
            "Data preferences saved successfully",
            "data preferences",
        )
    }

    pub fn logout(&self, session: &mut Session) {
        session.logout();
    }
}

fn report(notifier: &mut Notifier, result: Result<bool>, ok_msg: &str, what: &str) -> bool {
    match result {
        Ok(true) => {
            notifier.success("Success", ok_msg);
            true
        }
        Ok(false) => {
            notifier.error("Error", &format!("Failed to save {what}"));
            false
        }
        Err(e) => {
            error!(error = %e, "failed to save {what}");
            notifier.error("Error", &format!("Failed to save {what}"));
            false
        }
    }
}
