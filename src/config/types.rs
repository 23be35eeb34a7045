use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GnavConfig {
    /// Path of the navigation fragment, without the `.plain.html` suffix.
    /// A `<meta name="gnav">` on the host page takes precedence.
    #[serde(default = "default_path")]
    pub path: String,
    /// Origin the fragment is fetched from and relative links resolve to.
    #[serde(default = "default_origin")]
    pub origin: String,
    /// Viewport width at which the layout switches to desktop.
    #[serde(default = "default_desktop_min_width")]
    pub desktop_min_width: u32,
    /// Request timeout in seconds for fragment and profile requests.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    #[serde(default)]
    pub identity: IdentityConfig,
    /// Explicit identity environment. Derived from `origin` when absent.
    #[serde(default)]
    pub environment: Option<Environment>,
}

/// Registration settings handed to the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityConfig {
    #[serde(default = "default_client_id")]
    pub client_id: String,
    #[serde(default = "default_scope")]
    pub scope: String,
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default = "default_true")]
    pub auto_validate_token: bool,
    #[serde(default)]
    pub use_local_storage: bool,
    /// Script the provider loads to bootstrap itself.
    #[serde(default = "default_script_url")]
    pub script_url: String,
}

/// Identity and profile service endpoints for one deployment stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    /// Stage name, `stage` or `prod`.
    pub name: String,
    /// Identity environment passed on registration (`stg1`, `prod`).
    pub ims: String,
    /// Host of the profile service.
    pub adobe_io: String,
}

impl Environment {
    pub fn stage() -> Self {
        Self {
            name: "stage".to_string(),
            ims: "stg1".to_string(),
            adobe_io: "cc-collab-stage.adobe.io".to_string(),
        }
    }

    pub fn prod() -> Self {
        Self {
            name: "prod".to_string(),
            ims: "prod".to_string(),
            adobe_io: "cc-collab.adobe.io".to_string(),
        }
    }

    /// Pick the environment for a page served from `host`.
    ///
    /// Local development, preview hosts and anything with `stage` in its
    /// name talk to stage services; everything else to production.
    pub fn for_host(host: &str) -> Self {
        let host = host.to_ascii_lowercase();
        let is_stage = host == "localhost"
            || host.starts_with("localhost:")
            || host.ends_with(".hlx.page")
            || host.ends_with(".hlx.live")
            || host.contains("stage");
        if is_stage {
            Self::stage()
        } else {
            Self::prod()
        }
    }
}

fn default_path() -> String {
    "/gnav".to_string()
}

fn default_origin() -> String {
    "https://business.adobe.com".to_string()
}

fn default_desktop_min_width() -> u32 {
    1200
}

fn default_timeout() -> u32 {
    10
}

fn default_client_id() -> String {
    "bizweb".to_string()
}

fn default_scope() -> String {
    "AdobeID,openid,gnav".to_string()
}

fn default_locale() -> String {
    "en_US".to_string()
}

fn default_true() -> bool {
    true
}

fn default_script_url() -> String {
    "https://auth.services.adobe.com/imslib/imslib.min.js".to_string()
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            client_id: default_client_id(),
            scope: default_scope(),
            locale: default_locale(),
            auto_validate_token: true,
            use_local_storage: false,
            script_url: default_script_url(),
        }
    }
}

impl Default for GnavConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            origin: default_origin(),
            desktop_min_width: default_desktop_min_width(),
            timeout_seconds: default_timeout(),
            identity: IdentityConfig::default(),
            environment: None,
        }
    }
}
