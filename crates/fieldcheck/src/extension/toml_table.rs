use toml::value::Table;
use url::Url;

/// Extension trait for [`Table`](toml::Table).
pub trait TomlTableExt {
    /// Extracts the integer value corresponding to the key and
    /// represents it as `u16` if possible.
    fn get_u16(&self, key: &str) -> Option<u16>;

    /// Extracts the string corresponding to the key.
    fn get_str(&self, key: &str) -> Option<&str>;

    /// Extracts the table corresponding to the key.
    fn get_table(&self, key: &str) -> Option<&Table>;

    /// Extracts the string corresponding to the key and parses it as `Url`.
    fn parse_url(&self, key: &str) -> Option<Result<Url, url::ParseError>>;
}

impl TomlTableExt for Table {
    #[inline]
    fn get_u16(&self, key: &str) -> Option<u16> {
        self.get(key)
            .and_then(|v| v.as_integer())
            .and_then(|i| u16::try_from(i).ok())
    }

    #[inline]
    fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|v| v.as_str())
    }

    #[inline]
    fn get_table(&self, key: &str) -> Option<&Table> {
        self.get(key).and_then(|v| v.as_table())
    }

    #[inline]
    fn parse_url(&self, key: &str) -> Option<Result<Url, url::ParseError>> {
        self.get_str(key).map(|s| s.parse())
    }
}

#[cfg(test)]
mod tests {
    use super::TomlTableExt;
    use toml::Table;

    #[test]
    fn it_extracts_typed_values() {
        let table: Table = r#"
            host = "localhost"
            port = 5432
            ssl = false
            endpoint = "https://db.example.com/v1"
            [pool]
            size = 8
        "#
        .parse()
        .unwrap();
        assert_eq!(table.get_str("host"), Some("localhost"));
        assert_eq!(table.get_u16("port"), Some(5432));
        assert_eq!(
            table.get_table("pool").and_then(|pool| pool.get_u16("size")),
            Some(8)
        );
        assert_eq!(table.get_u16("ssl"), None);
        assert!(table.parse_url("endpoint").is_some_and(|url| url.is_ok()));
        assert_eq!(table.get_str("port"), None);
    }
}
