pub mod bootstrap;
pub mod config;
pub mod csv;
pub mod esg_clients;
pub mod llm_clients;
pub mod pdf;
pub mod storage;
