//! MongoDB connection configuration.

/// Configuration for connecting to the MongoDB instance backing the result store.
#[derive(Debug, Clone)]
pub struct MongoConfig {
    /// Connection URI, e.g. `mongodb://127.0.0.1:27017`. Read from `MONGO_URI`
    /// by the CLI layer; passed through here unchanged.
    pub uri: String,
    /// Database name within the MongoDB deployment.
    pub database: String,
}

impl MongoConfig {
    /// Creates a new configuration.
    pub fn new(uri: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database: database.into(),
        }
    }

    /// Returns the URI with any embedded credentials masked, suitable for logging.
    #[must_use]
    pub fn uri_masked(&self) -> String {
        match url::Url::parse(&self.uri) {
            Ok(mut parsed) if parsed.password().is_some() => {
                let _ = parsed.set_password(Some("***"));
                parsed.to_string()
            }
            _ => self.uri.clone(),
        }
    }
}
