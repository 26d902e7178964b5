use serde::{Deserialize, Serialize};
use std::{borrow::Cow, env, path::Path};

/// Request-scoped server variables used to build absolute URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerVars {
    /// Whether the request was served over HTTPS.
    pub https: bool,
    /// The `Host` header.
    pub host: String,
    /// The path of the executing script, e.g. `/shop/admin/index.php`.
    pub script_name: String,
    /// The absolute file path of the executing script.
    pub script_filename: String,
}

impl ServerVars {
    /// Reads the CGI variables `HTTPS`, `HTTP_HOST`, `SCRIPT_NAME` and `SCRIPT_FILENAME`.
    pub fn from_env() -> Self {
        let https = env::var("HTTPS").is_ok_and(|value| value.eq_ignore_ascii_case("on"));
        Self {
            https,
            host: env::var("HTTP_HOST").unwrap_or_default(),
            script_name: env::var("SCRIPT_NAME").unwrap_or_default(),
            script_filename: env::var("SCRIPT_FILENAME").unwrap_or_default(),
        }
    }

    /// Returns the URL scheme.
    #[inline]
    pub fn scheme(&self) -> &'static str {
        if self.https { "https" } else { "http" }
    }

    /// Returns the base URL of the running script with the `path` appended verbatim.
    /// The `/index.php` front controller is removed from the script name.
    pub fn base_url(&self, path: Option<&str>) -> String {
        let scheme = self.scheme();
        let host = &self.host;
        let script_dir = self.script_name.replace("/index.php", "");
        let mut url = format!("{scheme}://{host}{script_dir}");
        if let Some(path) = path {
            url.push_str(path);
        }
        url
    }

    /// Returns the base URL one directory above the running script
    /// with the `path` appended verbatim.
    /// The trailing segment named after the script's parent directory is removed
    /// and the trailing `/` is kept.
    pub fn back_url(&self, path: Option<&str>) -> String {
        let mut url = self.base_url(None);
        if let Some(dir_name) = self.script_dir_name() {
            if url
                .strip_suffix(&*dir_name)
                .is_some_and(|prefix| prefix.ends_with('/'))
            {
                url.truncate(url.len() - dir_name.len());
            }
        }
        if let Some(path) = path {
            url.push_str(path);
        }
        url
    }

    /// Returns the name of the directory containing the script file.
    fn script_dir_name(&self) -> Option<Cow<'_, str>> {
        Path::new(&self.script_filename)
            .parent()
            .and_then(|dir| dir.file_name())
            .map(|name| name.to_string_lossy())
            .filter(|name| !name.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::ServerVars;

    fn admin_vars() -> ServerVars {
        ServerVars {
            https: true,
            host: "shop.example.com".to_owned(),
            script_name: "/shop/admin/index.php".to_owned(),
            script_filename: "/var/www/shop/admin/index.php".to_owned(),
        }
    }

    #[test]
    fn it_builds_base_urls() {
        let vars = admin_vars();
        assert_eq!(vars.base_url(None), "https://shop.example.com/shop/admin");
        assert_eq!(
            vars.base_url(Some("/products?page=2")),
            "https://shop.example.com/shop/admin/products?page=2"
        );

        let vars = ServerVars {
            https: false,
            host: "localhost:8080".to_owned(),
            script_name: "/index.php".to_owned(),
            script_filename: "/var/www/html/index.php".to_owned(),
        };
        assert_eq!(vars.base_url(None), "http://localhost:8080");
    }

    #[test]
    fn it_builds_back_urls() {
        let vars = admin_vars();
        assert_eq!(vars.back_url(None), "https://shop.example.com/shop/");
        assert_eq!(
            vars.back_url(Some("assets/app.css")),
            "https://shop.example.com/shop/assets/app.css"
        );

        let vars = ServerVars {
            script_filename: "/var/www/public/index.php".to_owned(),
            ..admin_vars()
        };
        assert_eq!(vars.back_url(None), "https://shop.example.com/shop/admin");
    }
}
