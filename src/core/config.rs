use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub(crate) struct Args {
    pub(crate) database_host: String,
    pub(crate) database_port: u16,
    pub(crate) database_name: String,
    pub(crate) database_user: String,
    pub(crate) database_password: String,
    #[serde(default = "default_max_connections")]
    pub(crate) database_max_connections: u32,
    pub(crate) log_level: String,
    pub(crate) port: u16,
    pub(crate) secret: String,
}

fn default_max_connections() -> u32 {
    5
}

impl Args {
    pub(crate) fn database_url(&self) -> String {
        format!(
            "postgresql://{}:{}@{}:{}/{}",
            self.database_user,
            self.database_password,
            self.database_host,
            self.database_port,
            self.database_name
        )
    }
}
