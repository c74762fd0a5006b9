use thiserror::Error;

#[derive(Error, Debug)]
pub enum ZooError {
    #[error("Animal error: {message}")]
    AnimalError { message: String },

    #[error("Enclosure error: {message}")]
    EnclosureError { message: String },

    #[error("Staff error: {message}")]
    StaffError { message: String },

    #[error("Resource error: {message}")]
    ResourceError { message: String },

    #[error("{message} (balance: ${current_balance:.2}, required: ${required_amount:.2})")]
    FinancialError {
        message: String,
        current_balance: f64,
        required_amount: f64,
    },

    #[error("{message}")]
    CompatibilityError {
        message: String,
        animal1_species: String,
        animal2_species: String,
    },

    #[error("Invalid amount: {amount}")]
    InvalidAmountError { amount: f64 },

    #[error("No zoo created yet")]
    NoZooError,

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV report error: {0}")]
    CsvError(#[from] csv::Error),

    #[cfg(feature = "cli")]
    #[error("Input error: {0}")]
    ReadlineError(#[from] rustyline::error::ReadlineError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Animal,
    Habitat,
    Staff,
    Supplies,
    Finance,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ZooError {
    pub fn animal(message: impl Into<String>) -> Self {
        Self::AnimalError {
            message: message.into(),
        }
    }

    pub fn enclosure(message: impl Into<String>) -> Self {
        Self::EnclosureError {
            message: message.into(),
        }
    }

    pub fn staff(message: impl Into<String>) -> Self {
        Self::StaffError {
            message: message.into(),
        }
    }

    pub fn resource(message: impl Into<String>) -> Self {
        Self::ResourceError {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::AnimalError { .. } | Self::CompatibilityError { .. } => ErrorCategory::Animal,
            Self::EnclosureError { .. } => ErrorCategory::Habitat,
            Self::StaffError { .. } => ErrorCategory::Staff,
            Self::ResourceError { .. } => ErrorCategory::Supplies,
            Self::FinancialError { .. } | Self::InvalidAmountError { .. } => ErrorCategory::Finance,
            Self::NoZooError
            | Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. }
            | Self::TomlError(_) => ErrorCategory::Configuration,
            Self::IoError(_) | Self::SerializationError(_) | Self::CsvError(_) => {
                ErrorCategory::System
            }
            #[cfg(feature = "cli")]
            Self::ReadlineError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 遊戲中的操作失敗，玩家可以直接重試
            Self::AnimalError { .. }
            | Self::CompatibilityError { .. }
            | Self::EnclosureError { .. }
            | Self::StaffError { .. } => ErrorSeverity::Low,
            Self::ResourceError { .. }
            | Self::FinancialError { .. }
            | Self::InvalidAmountError { .. } => ErrorSeverity::Medium,
            Self::NoZooError
            | Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. }
            | Self::TomlError(_) => ErrorSeverity::High,
            Self::IoError(_) | Self::SerializationError(_) | Self::CsvError(_) => {
                ErrorSeverity::Critical
            }
            #[cfg(feature = "cli")]
            Self::ReadlineError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::CompatibilityError {
                animal1_species,
                animal2_species,
                ..
            } => format!(
                "{} cannot live together with {}",
                animal1_species, animal2_species
            ),
            Self::FinancialError {
                current_balance,
                required_amount,
                ..
            } => format!(
                "Not enough money: ${:.2} available, ${:.2} needed",
                current_balance, required_amount
            ),
            Self::NoZooError => "Please create a zoo first!".to_string(),
            Self::TomlError(_) | Self::MissingConfigError { .. } => {
                format!("The scenario file could not be used: {}", self)
            }
            _ => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Animal => "Pick a compatible enclosure or check the animal's options",
            ErrorCategory::Habitat => "Check the enclosure name and its free capacity",
            ErrorCategory::Staff => "Start the zookeeper's shift before assigning work",
            ErrorCategory::Supplies => "Buy supplies before feeding or treating animals",
            ErrorCategory::Finance => "Wait for ticket income or cut back on orders",
            ErrorCategory::Configuration => "Check the scenario TOML and command-line flags",
            ErrorCategory::System => "Check file paths and permissions, then try again",
        }
    }
}

pub type Result<T> = std::result::Result<T, ZooError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_financial_error_carries_amounts() {
        let err = ZooError::FinancialError {
            message: "Insufficient funds for escape recovery".to_string(),
            current_balance: 120.0,
            required_amount: 500.0,
        };

        assert_eq!(err.category(), ErrorCategory::Finance);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err.to_string().contains("balance: $120.00"));
        assert!(err.user_friendly_message().contains("$500.00 needed"));
    }

    #[test]
    fn test_severity_ordering_for_exit_codes() {
        assert!(ZooError::animal("x").severity() < ZooError::NoZooError.severity());
        let io = ZooError::from(std::io::Error::other("disk"));
        assert_eq!(io.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn test_compatibility_message_names_both_species() {
        let err = ZooError::CompatibilityError {
            message: "Cannot add Zebra".to_string(),
            animal1_species: "Zebra".to_string(),
            animal2_species: "Lion".to_string(),
        };
        assert_eq!(
            err.user_friendly_message(),
            "Zebra cannot live together with Lion"
        );
    }
}
