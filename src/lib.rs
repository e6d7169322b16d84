pub mod config;
pub mod notifications;

pub mod commands {
    pub mod postcp;
}
