pub mod config;
pub mod latex_tools;
pub mod openai_client;
pub mod stages;
pub mod pipeline;
