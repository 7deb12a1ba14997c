use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of an appointment.
///
/// Serialized with the backend's wire values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppointmentStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

/// Badge colour used by list views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BadgeVariant {
    Warning,
    Success,
    Danger,
    Info,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 4] = [
        AppointmentStatus::Pending,
        AppointmentStatus::Confirmed,
        AppointmentStatus::Cancelled,
        AppointmentStatus::Completed,
    ];

    pub fn wire_value(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "Beklemede",
            AppointmentStatus::Confirmed => "Onaylandı",
            AppointmentStatus::Cancelled => "İptal Edildi",
            AppointmentStatus::Completed => "Tamamlandı",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "Pending",
            AppointmentStatus::Confirmed => "Confirmed",
            AppointmentStatus::Cancelled => "Cancelled",
            AppointmentStatus::Completed => "Completed",
        }
    }

    pub fn badge(&self) -> BadgeVariant {
        match self {
            AppointmentStatus::Pending => BadgeVariant::Warning,
            AppointmentStatus::Confirmed => BadgeVariant::Success,
            AppointmentStatus::Cancelled => BadgeVariant::Danger,
            AppointmentStatus::Completed => BadgeVariant::Info,
        }
    }
}

impl FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            // edit templates start out with an empty status
            "" => Ok(AppointmentStatus::Pending),
            "Beklemede" | "Pending" | "pending" => Ok(AppointmentStatus::Pending),
            "Onaylandı" | "Confirmed" | "confirmed" => Ok(AppointmentStatus::Confirmed),
            "İptal Edildi" | "Cancelled" | "cancelled" => Ok(AppointmentStatus::Cancelled),
            "Tamamlandı" | "Completed" | "completed" => Ok(AppointmentStatus::Completed),
            other => Err(format!(
                "Invalid appointment status: '{other}'. Must be one of: Beklemede, Onaylandı, İptal Edildi, Tamamlandı"
            )),
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for AppointmentStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.wire_value())
    }
}

impl<'de> Deserialize<'de> for AppointmentStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_values_round_trip() {
        for status in AppointmentStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            let back: AppointmentStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(back, status);
        }
    }

    #[test]
    fn empty_status_defaults_to_pending() {
        let status: AppointmentStatus = serde_json::from_str("\"\"").unwrap();
        assert_eq!(status, AppointmentStatus::Pending);
    }

    #[test]
    fn badges() {
        assert_eq!(AppointmentStatus::Pending.badge(), BadgeVariant::Warning);
        assert_eq!(AppointmentStatus::Cancelled.badge(), BadgeVariant::Danger);
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!("Ertelendi".parse::<AppointmentStatus>().is_err());
    }
}
