//! Session data: signed-in user, chosen role, form data, services, wallet.

use std::collections::BTreeSet;

use crate::certification::CertificationRecord;
use crate::chat::ChatLog;
use crate::notifications::NotificationCenter;
use crate::personal::PersonalData;

pub const INITIAL_BALANCE_HTB: f64 = 1245.75;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub name: String,
    pub role: String,
    pub blockchain_address: String,
}

impl User {
    /// Profile returned by the mocked login backend.
    pub fn mock() -> Self {
        Self {
            name: "John Doe".to_string(),
            role: "Normal User".to_string(),
            blockchain_address: "0x742d35Cc6634C0532925a3b844Bc454e4438fdfe".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    NormalUser,
    HealthProfessional,
    Facility,
    Researcher,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::NormalUser,
        Role::HealthProfessional,
        Role::Facility,
        Role::Researcher,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Role::NormalUser => "normal-user",
            Role::HealthProfessional => "health-professional",
            Role::Facility => "facility",
            Role::Researcher => "researcher",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::NormalUser => "Normal User",
            Role::HealthProfessional => "Health Professional",
            Role::Facility => "Health Facility",
            Role::Researcher => "Researcher",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Role::NormalUser => "Manage your own health records and data sharing",
            Role::HealthProfessional => "Access patient data with consent, issue records",
            Role::Facility => "Register a hospital, clinic or pharmacy",
            Role::Researcher => "Request anonymised datasets for studies",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceInfo {
    pub id: &'static str,
    pub label: &'static str,
}

pub const SERVICE_CATALOG: [ServiceInfo; 8] = [
    ServiceInfo {
        id: "health-records",
        label: "Health Records",
    },
    ServiceInfo {
        id: "telemedicine",
        label: "Telemedicine",
    },
    ServiceInfo {
        id: "pharmacy",
        label: "Pharmacy",
    },
    ServiceInfo {
        id: "insurance",
        label: "Insurance",
    },
    ServiceInfo {
        id: "lab-results",
        label: "Lab Results",
    },
    ServiceInfo {
        id: "emergency-response",
        label: "Emergency Response",
    },
    ServiceInfo {
        id: "health-wallet",
        label: "Health Wallet",
    },
    ServiceInfo {
        id: "research-sharing",
        label: "Research Data Sharing",
    },
];

/// Mutable session state owned by the flow controller.
#[derive(Debug, Clone)]
pub struct Session {
    pub current_user: Option<User>,
    pub selected_role: Option<Role>,
    pub personal_data: PersonalData,
    pub certification: CertificationRecord,
    pub selected_services: BTreeSet<String>,
    pub terms_accepted: bool,
    pub chat: ChatLog,
    pub wallet_balance: f64,
    pub notifications: NotificationCenter,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            current_user: None,
            selected_role: None,
            personal_data: PersonalData::default(),
            certification: CertificationRecord::default(),
            selected_services: BTreeSet::new(),
            terms_accepted: false,
            chat: ChatLog::default(),
            wallet_balance: INITIAL_BALANCE_HTB,
            notifications: NotificationCenter::seeded(),
        }
    }
}

impl Session {
    /// Flip membership of `service`. Returns true if it is now selected.
    pub fn toggle_service(&mut self, service: &str) -> bool {
        if self.selected_services.remove(service) {
            false
        } else {
            self.selected_services.insert(service.to_string());
            true
        }
    }

    pub fn is_service_selected(&self, service: &str) -> bool {
        self.selected_services.contains(service)
    }

    /// Counter text under the services grid.
    pub fn service_count_label(&self) -> String {
        format!("{} services", self.selected_services.len())
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_session() {
        let s = Session::default();
        assert!(!s.is_authenticated());
        assert_eq!(s.wallet_balance, 1245.75);
        assert_eq!(s.notifications.unread_count(), 3);
        assert_eq!(s.service_count_label(), "0 services");
    }

    #[test]
    fn toggle_twice_unselects() {
        let mut s = Session::default();
        assert!(s.toggle_service("telemedicine"));
        assert!(s.is_service_selected("telemedicine"));
        assert_eq!(s.service_count_label(), "1 services");
        assert!(!s.toggle_service("telemedicine"));
        assert!(s.selected_services.is_empty());
    }

    #[test]
    fn catalog_ids_are_unique() {
        let ids: BTreeSet<_> = SERVICE_CATALOG.iter().map(|s| s.id).collect();
        assert_eq!(ids.len(), SERVICE_CATALOG.len());
    }
}
