use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use axum::http::HeaderName;
use rolegate_application::SeedMembership;
use rolegate_core::AppError;
use rolegate_domain::RoleName;
use tracing_subscriber::EnvFilter;

/// Header carrying the authenticated subject when none is configured.
pub const DEFAULT_AUTH_SUBJECT_HEADER: &str = "x-authenticated-subject";

/// Command selected by the first process argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCommand {
    Serve,
    Migrate,
    Seed,
    AssignRole { subject: String, role: String },
}

impl ApiCommand {
    fn parse(args: &[String]) -> Result<Self, AppError> {
        match args.first().map(String::as_str) {
            None | Some("serve") => Ok(Self::Serve),
            Some("migrate") => Ok(Self::Migrate),
            Some("seed") => Ok(Self::Seed),
            Some("assign-role") => match (args.get(1), args.get(2)) {
                (Some(subject), Some(role)) => Ok(Self::AssignRole {
                    subject: subject.clone(),
                    role: role.clone(),
                }),
                _ => Err(AppError::Validation(
                    "usage: assign-role <subject> <role>".to_owned(),
                )),
            },
            Some(other) => Err(AppError::Validation(format!(
                "unknown command '{other}', expected serve, migrate, seed or assign-role"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres { database_url: String },
    Memory,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub command: ApiCommand,
    pub store: StoreBackend,
    pub api_host: String,
    pub api_port: u16,
    pub auth_subject_header: HeaderName,
    pub seed_on_startup: bool,
    pub seed_memberships: Vec<SeedMembership>,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let args = env::args().skip(1).collect::<Vec<_>>();
        Self::from_sources(&args, |name| env::var(name).ok())
    }

    fn from_sources(
        args: &[String],
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        let command = ApiCommand::parse(args)?;

        let store = match lookup("RBAC_STORE")
            .unwrap_or_else(|| "postgres".to_owned())
            .as_str()
        {
            "postgres" => StoreBackend::Postgres {
                database_url: required_env(&lookup, "DATABASE_URL")?,
            },
            "memory" => StoreBackend::Memory,
            other => {
                return Err(AppError::Validation(format!(
                    "RBAC_STORE must be either 'postgres' or 'memory', got '{other}'"
                )));
            }
        };

        if store == StoreBackend::Memory && command != ApiCommand::Serve {
            return Err(AppError::Validation(
                "provisioning commands require RBAC_STORE=postgres".to_owned(),
            ));
        }

        let api_host = lookup("API_HOST").unwrap_or_else(|| "127.0.0.1".to_owned());
        let api_port = match lookup("API_PORT") {
            Some(value) => value
                .parse::<u16>()
                .map_err(|error| AppError::Validation(format!("invalid API_PORT: {error}")))?,
            None => 3001,
        };

        let header_value = lookup("AUTH_SUBJECT_HEADER")
            .unwrap_or_else(|| DEFAULT_AUTH_SUBJECT_HEADER.to_owned());
        let auth_subject_header = HeaderName::from_bytes(header_value.trim().as_bytes())
            .map_err(|error| {
                AppError::Validation(format!("invalid AUTH_SUBJECT_HEADER: {error}"))
            })?;

        let seed_on_startup = match lookup("SEED_ON_STARTUP") {
            Some(value) => parse_flag("SEED_ON_STARTUP", value.as_str())?,
            None => false,
        };

        let seed_memberships = lookup("SEED_SUBJECT_ROLES")
            .map(|value| parse_seed_memberships(value.as_str()))
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            command,
            store,
            api_host,
            api_port,
            auth_subject_header,
            seed_on_startup,
            seed_memberships,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

/// Parses `subject=Role,subject=Role` into seed memberships.
fn parse_seed_memberships(value: &str) -> Result<Vec<SeedMembership>, AppError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (subject, role) = entry.split_once('=').ok_or_else(|| {
                AppError::Validation(format!(
                    "SEED_SUBJECT_ROLES entry '{entry}' must look like subject=Role"
                ))
            })?;
            let subject = subject.trim();
            if subject.is_empty() {
                return Err(AppError::Validation(format!(
                    "SEED_SUBJECT_ROLES entry '{entry}' has an empty subject"
                )));
            }

            Ok(SeedMembership {
                subject: subject.to_owned(),
                role: RoleName::new(role)?,
            })
        })
        .collect()
}

fn parse_flag(name: &str, value: &str) -> Result<bool, AppError> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(AppError::Validation(format!(
            "{name} must be 'true' or 'false', got '{value}'"
        )))
    }
}

fn required_env(lookup: impl Fn(&str) -> Option<String>, name: &str) -> Result<String, AppError> {
    let value = lookup(name).ok_or_else(|| AppError::Validation(format!("{name} is required")))?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }

    Ok(value)
}
