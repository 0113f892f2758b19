//! # Broker Configuration
//!
//! Resolves the broker address and the one credential source used for the
//! connection.
//!
//! ## Sources
//!
//! - Baked-in defaults, compiled in through `CLOG_DEFAULT_*` build-time
//!   environment variables ([`BakedDefaults::compiled`])
//! - Runtime overrides from `NATS_*` environment variables ([`EnvOverrides`])
//!
//! ## Credential Priority
//!
//! First match wins, lower sources are ignored even when set:
//!
//! 1. `NATS_CREDS` credentials file
//! 2. `NATS_USERNAME` + `NATS_PASSWORD`
//! 3. `NATS_TOKEN`
//! 4. `NATS_NKEY` seed
//! 5. `NATS_JWT` + `NATS_SEED`
//! 6. Baked-in credentials selected by `CLOG_DEFAULT_AUTH_TYPE`
//! 7. No authentication

use std::env;
use std::fmt;
use std::path::PathBuf;

/// Broker address used when nothing else is configured.
pub const FALLBACK_NATS_URL: &str = "nats://localhost:4222";

/// Environment variable overriding the broker address.
pub const NATS_URL_ENV: &str = "NATS_URL";
/// Environment variable naming a credentials file.
pub const NATS_CREDS_ENV: &str = "NATS_CREDS";
/// Environment variable for the username.
pub const NATS_USERNAME_ENV: &str = "NATS_USERNAME";
/// Environment variable for the password.
pub const NATS_PASSWORD_ENV: &str = "NATS_PASSWORD";
/// Environment variable for the bearer token.
pub const NATS_TOKEN_ENV: &str = "NATS_TOKEN";
/// Environment variable for the NKey seed.
pub const NATS_NKEY_ENV: &str = "NATS_NKEY";
/// Environment variable for the user JWT.
pub const NATS_JWT_ENV: &str = "NATS_JWT";
/// Environment variable for the seed that signs with the JWT.
pub const NATS_SEED_ENV: &str = "NATS_SEED";

const fn baked(value: Option<&'static str>) -> &'static str {
    match value {
        Some(v) => v,
        None => "",
    }
}

const COMPILED_NATS_URL: &str = baked(option_env!("CLOG_DEFAULT_NATS_URL"));
const COMPILED_AUTH_TYPE: &str = baked(option_env!("CLOG_DEFAULT_AUTH_TYPE"));
const COMPILED_CREDS: &str = baked(option_env!("CLOG_DEFAULT_CREDS"));
const COMPILED_USERNAME: &str = baked(option_env!("CLOG_DEFAULT_USERNAME"));
const COMPILED_PASSWORD: &str = baked(option_env!("CLOG_DEFAULT_PASSWORD"));
const COMPILED_TOKEN: &str = baked(option_env!("CLOG_DEFAULT_TOKEN"));
const COMPILED_NKEY: &str = baked(option_env!("CLOG_DEFAULT_NKEY"));
const COMPILED_JWT: &str = baked(option_env!("CLOG_DEFAULT_JWT"));
const COMPILED_SEED: &str = baked(option_env!("CLOG_DEFAULT_SEED"));

/// Authentication shape selected for baked-in credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthType {
    #[default]
    None,
    CredsFile,
    UserPassword,
    Token,
    NKey,
    Decentralized,
}

impl AuthType {
    /// Parse a build-time auth type name. Unknown names mean no authentication.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "creds" => Self::CredsFile,
            "userpass" => Self::UserPassword,
            "token" => Self::Token,
            "nkey" => Self::NKey,
            "decentralized" => Self::Decentralized,
            _ => Self::None,
        }
    }
}

/// Credentials compiled into the binary.
#[derive(Clone, PartialEq, Eq)]
pub struct BakedDefaults {
    pub nats_url: String,
    pub auth_type: AuthType,
    pub creds_file: String,
    pub username: String,
    pub password: String,
    pub token: String,
    pub nkey: String,
    pub jwt: String,
    pub seed: String,
}

impl Default for BakedDefaults {
    fn default() -> Self {
        Self {
            nats_url: FALLBACK_NATS_URL.to_string(),
            auth_type: AuthType::None,
            creds_file: String::new(),
            username: String::new(),
            password: String::new(),
            token: String::new(),
            nkey: String::new(),
            jwt: String::new(),
            seed: String::new(),
        }
    }
}

impl BakedDefaults {
    /// Defaults captured from `CLOG_DEFAULT_*` when the crate was compiled.
    #[must_use]
    pub fn compiled() -> Self {
        let nats_url = if COMPILED_NATS_URL.is_empty() {
            FALLBACK_NATS_URL
        } else {
            COMPILED_NATS_URL
        };

        Self {
            nats_url: nats_url.to_string(),
            auth_type: AuthType::from_name(COMPILED_AUTH_TYPE),
            creds_file: COMPILED_CREDS.to_string(),
            username: COMPILED_USERNAME.to_string(),
            password: COMPILED_PASSWORD.to_string(),
            token: COMPILED_TOKEN.to_string(),
            nkey: COMPILED_NKEY.to_string(),
            jwt: COMPILED_JWT.to_string(),
            seed: COMPILED_SEED.to_string(),
        }
    }

    /// Credentials for the configured auth type, if its fields are filled in.
    fn credentials(&self) -> Option<Credentials> {
        match self.auth_type {
            AuthType::None => None,
            AuthType::CredsFile => {
                non_empty(&self.creds_file).map(|p| Credentials::CredsFile(PathBuf::from(p)))
            }
            AuthType::UserPassword => {
                user_password(non_empty(&self.username), non_empty(&self.password))
            }
            AuthType::Token => non_empty(&self.token).map(Credentials::Token),
            AuthType::NKey => non_empty(&self.nkey).map(|seed| Credentials::NKey { seed }),
            AuthType::Decentralized => jwt_seed(non_empty(&self.jwt), non_empty(&self.seed)),
        }
    }
}

impl fmt::Debug for BakedDefaults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BakedDefaults")
            .field("nats_url", &self.nats_url)
            .field("auth_type", &self.auth_type)
            .finish_non_exhaustive()
    }
}

/// `NATS_*` values read from the process environment.
///
/// Empty values are treated as unset.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    pub nats_url: Option<String>,
    pub creds_file: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub token: Option<String>,
    pub nkey: Option<String>,
    pub jwt: Option<String>,
    pub seed: Option<String>,
}

impl EnvOverrides {
    /// Read overrides from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read overrides through an arbitrary lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        Self {
            nats_url: get(NATS_URL_ENV),
            creds_file: get(NATS_CREDS_ENV),
            username: get(NATS_USERNAME_ENV),
            password: get(NATS_PASSWORD_ENV),
            token: get(NATS_TOKEN_ENV),
            nkey: get(NATS_NKEY_ENV),
            jwt: get(NATS_JWT_ENV),
            seed: get(NATS_SEED_ENV),
        }
    }
}

impl fmt::Debug for EnvOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvOverrides")
            .field("nats_url", &self.nats_url)
            .field("creds_file", &self.creds_file)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// The single authentication strategy used for a connection.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Path to a `.creds` file holding a JWT and seed.
    CredsFile(PathBuf),
    /// Username and password.
    UserPassword { user: String, password: String },
    /// Bearer token.
    Token(String),
    /// NKey seed used to sign the server nonce.
    NKey { seed: String },
    /// User JWT plus the seed that signs the server nonce.
    JwtSeed { jwt: String, seed: String },
    /// Anonymous connection.
    None,
}

impl Credentials {
    /// Short name of the strategy, safe to log.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CredsFile(_) => "creds-file",
            Self::UserPassword { .. } => "userpass",
            Self::Token(_) => "token",
            Self::NKey { .. } => "nkey",
            Self::JwtSeed { .. } => "jwt-seed",
            Self::None => "none",
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CredsFile(path) => f.debug_tuple("CredsFile").field(path).finish(),
            Self::UserPassword { user, .. } => f
                .debug_struct("UserPassword")
                .field("user", user)
                .field("password", &"<redacted>")
                .finish(),
            Self::Token(_) => f.debug_tuple("Token").field(&"<redacted>").finish(),
            Self::NKey { .. } => f.debug_struct("NKey").field("seed", &"<redacted>").finish(),
            Self::JwtSeed { .. } => f
                .debug_struct("JwtSeed")
                .field("jwt", &"<redacted>")
                .field("seed", &"<redacted>")
                .finish(),
            Self::None => f.write_str("None"),
        }
    }
}

/// Where the selected credentials came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialOrigin {
    Environment,
    BakedIn,
    None,
}

/// Pick the highest-priority credential source that is fully configured.
#[must_use]
pub fn resolve_credentials(
    env: &EnvOverrides,
    defaults: &BakedDefaults,
) -> (Credentials, CredentialOrigin) {
    let from_env = [
        env.creds_file
            .as_ref()
            .map(|p| Credentials::CredsFile(PathBuf::from(p))),
        user_password(env.username.clone(), env.password.clone()),
        env.token.clone().map(Credentials::Token),
        env.nkey.clone().map(|seed| Credentials::NKey { seed }),
        jwt_seed(env.jwt.clone(), env.seed.clone()),
    ];

    from_env
        .into_iter()
        .flatten()
        .next()
        .map(|c| (c, CredentialOrigin::Environment))
        .or_else(|| defaults.credentials().map(|c| (c, CredentialOrigin::BakedIn)))
        .unwrap_or((Credentials::None, CredentialOrigin::None))
}

/// Broker address and credentials for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokerSettings {
    /// Broker URL, e.g. `nats://localhost:4222`.
    pub url: String,
    /// Selected credentials.
    pub credentials: Credentials,
    /// Source of `credentials`.
    pub origin: CredentialOrigin,
}

impl BrokerSettings {
    /// Resolve settings from overrides and baked-in defaults.
    #[must_use]
    pub fn resolve(env: &EnvOverrides, defaults: &BakedDefaults) -> Self {
        let url = env
            .nats_url
            .clone()
            .unwrap_or_else(|| defaults.nats_url.clone());
        let (credentials, origin) = resolve_credentials(env, defaults);

        Self {
            url,
            credentials,
            origin,
        }
    }

    /// Resolve from the process environment and compiled-in defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::resolve(&EnvOverrides::from_env(), &BakedDefaults::compiled())
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

fn user_password(user: Option<String>, password: Option<String>) -> Option<Credentials> {
    Some(Credentials::UserPassword {
        user: user?,
        password: password?,
    })
}

fn jwt_seed(jwt: Option<String>, seed: Option<String>) -> Option<Credentials> {
    Some(Credentials::JwtSeed {
        jwt: jwt?,
        seed: seed?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn overrides(pairs: &[(&str, &str)]) -> EnvOverrides {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EnvOverrides::from_lookup(|key| vars.get(key).cloned())
    }

    fn all_env_sources() -> Vec<(&'static str, &'static str)> {
        vec![
            (NATS_CREDS_ENV, "/etc/nats/user.creds"),
            (NATS_USERNAME_ENV, "alice"),
            (NATS_PASSWORD_ENV, "hunter2"),
            (NATS_TOKEN_ENV, "s3cr3t"),
            (NATS_NKEY_ENV, "SUAKSEED"),
            (NATS_JWT_ENV, "eyJ.jwt"),
            (NATS_SEED_ENV, "SUAJWTSEED"),
        ]
    }

    fn baked_token() -> BakedDefaults {
        BakedDefaults {
            auth_type: AuthType::Token,
            token: "baked-token".into(),
            ..BakedDefaults::default()
        }
    }

    #[test]
    fn test_default_baked_values() {
        let defaults = BakedDefaults::default();
        assert_eq!(defaults.nats_url, "nats://localhost:4222");
        assert_eq!(defaults.auth_type, AuthType::None);
        assert!(defaults.username.is_empty());
        assert!(defaults.password.is_empty());
        assert!(defaults.token.is_empty());
        assert!(defaults.nkey.is_empty());
        assert!(defaults.jwt.is_empty());
        assert!(defaults.seed.is_empty());
    }

    #[test]
    fn test_auth_type_names() {
        assert_eq!(AuthType::from_name("none"), AuthType::None);
        assert_eq!(AuthType::from_name("creds"), AuthType::CredsFile);
        assert_eq!(AuthType::from_name("userpass"), AuthType::UserPassword);
        assert_eq!(AuthType::from_name("token"), AuthType::Token);
        assert_eq!(AuthType::from_name("nkey"), AuthType::NKey);
        assert_eq!(AuthType::from_name("decentralized"), AuthType::Decentralized);
        assert_eq!(AuthType::from_name("kerberos"), AuthType::None);
        assert_eq!(AuthType::from_name(""), AuthType::None);
    }

    #[test]
    fn test_priority_walks_down_the_list() {
        let mut vars = all_env_sources();
        let expected = ["creds-file", "userpass", "token", "nkey", "jwt-seed"];

        for kind in expected {
            let (creds, origin) = resolve_credentials(&overrides(&vars), &baked_token());
            assert_eq!(creds.kind(), kind);
            assert_eq!(origin, CredentialOrigin::Environment);

            // Drop the winning source so the next one takes over.
            match kind {
                "creds-file" => vars.retain(|(k, _)| *k != NATS_CREDS_ENV),
                "userpass" => vars.retain(|(k, _)| *k != NATS_USERNAME_ENV),
                "token" => vars.retain(|(k, _)| *k != NATS_TOKEN_ENV),
                "nkey" => vars.retain(|(k, _)| *k != NATS_NKEY_ENV),
                _ => vars.retain(|(k, _)| *k != NATS_JWT_ENV),
            }
        }

        let (creds, origin) = resolve_credentials(&overrides(&vars), &baked_token());
        assert_eq!(creds, Credentials::Token("baked-token".into()));
        assert_eq!(origin, CredentialOrigin::BakedIn);

        let (creds, origin) = resolve_credentials(&overrides(&vars), &BakedDefaults::default());
        assert_eq!(creds, Credentials::None);
        assert_eq!(origin, CredentialOrigin::None);
    }

    #[test]
    fn test_creds_file_wins_over_everything() {
        let (creds, _) = resolve_credentials(&overrides(&all_env_sources()), &baked_token());
        assert_eq!(
            creds,
            Credentials::CredsFile(PathBuf::from("/etc/nats/user.creds"))
        );
    }

    #[test]
    fn test_half_pairs_fall_through() {
        let env = overrides(&[(NATS_USERNAME_ENV, "alice"), (NATS_TOKEN_ENV, "tok")]);
        let (creds, _) = resolve_credentials(&env, &BakedDefaults::default());
        assert_eq!(creds, Credentials::Token("tok".into()));

        let env = overrides(&[(NATS_JWT_ENV, "eyJ.jwt")]);
        let (creds, origin) = resolve_credentials(&env, &baked_token());
        assert_eq!(creds.kind(), "token");
        assert_eq!(origin, CredentialOrigin::BakedIn);
    }

    #[test]
    fn test_empty_env_values_are_unset() {
        let env = overrides(&[(NATS_CREDS_ENV, ""), (NATS_TOKEN_ENV, "tok"), (NATS_URL_ENV, "")]);
        assert_eq!(env.creds_file, None);
        assert_eq!(env.nats_url, None);
        let (creds, _) = resolve_credentials(&env, &BakedDefaults::default());
        assert_eq!(creds.kind(), "token");
    }

    #[test]
    fn test_baked_auth_type_with_empty_fields_is_anonymous() {
        let defaults = BakedDefaults {
            auth_type: AuthType::UserPassword,
            username: "svc".into(),
            ..BakedDefaults::default()
        };
        let (creds, origin) = resolve_credentials(&EnvOverrides::default(), &defaults);
        assert_eq!(creds, Credentials::None);
        assert_eq!(origin, CredentialOrigin::None);
    }

    #[test]
    fn test_baked_shapes() {
        let cases = [
            (
                BakedDefaults {
                    auth_type: AuthType::CredsFile,
                    creds_file: "/opt/clog.creds".into(),
                    ..BakedDefaults::default()
                },
                "creds-file",
            ),
            (
                BakedDefaults {
                    auth_type: AuthType::UserPassword,
                    username: "svc".into(),
                    password: "pw".into(),
                    ..BakedDefaults::default()
                },
                "userpass",
            ),
            (
                BakedDefaults {
                    auth_type: AuthType::NKey,
                    nkey: "SUAKSEED".into(),
                    ..BakedDefaults::default()
                },
                "nkey",
            ),
            (
                BakedDefaults {
                    auth_type: AuthType::Decentralized,
                    jwt: "eyJ.jwt".into(),
                    seed: "SUASEED".into(),
                    ..BakedDefaults::default()
                },
                "jwt-seed",
            ),
        ];

        for (defaults, kind) in cases {
            let (creds, origin) = resolve_credentials(&EnvOverrides::default(), &defaults);
            assert_eq!(creds.kind(), kind);
            assert_eq!(origin, CredentialOrigin::BakedIn);
        }
    }

    #[test]
    fn test_url_override() {
        let settings = BrokerSettings::resolve(
            &overrides(&[(NATS_URL_ENV, "nats://broker:4333")]),
            &BakedDefaults::default(),
        );
        assert_eq!(settings.url, "nats://broker:4333");

        let settings = BrokerSettings::resolve(&EnvOverrides::default(), &BakedDefaults::default());
        assert_eq!(settings.url, FALLBACK_NATS_URL);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let creds = Credentials::UserPassword {
            user: "alice".into(),
            password: "hunter2".into(),
        };
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("alice"));
        assert!(!rendered.contains("hunter2"));

        let rendered = format!("{:?}", Credentials::Token("s3cr3t".into()));
        assert!(!rendered.contains("s3cr3t"));

        let rendered = format!("{:?}", overrides(&all_env_sources()));
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("SUAKSEED"));
    }
}
