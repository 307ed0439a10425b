mod base;
mod ollama;

pub use ollama::OllamaClient;
