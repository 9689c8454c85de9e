/// Body served by both hello endpoints.
pub const GREETING: &str = "Hello from extension-name!";

/// Produces the text both hello endpoints return.
pub trait GreetingProvider: Send + Sync + 'static {
    fn greeting(&self) -> String;
}

/// Greeting fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticGreeting {
    text: String,
}

impl StaticGreeting {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Default for StaticGreeting {
    fn default() -> Self {
        Self::new(GREETING)
    }
}

impl GreetingProvider for StaticGreeting {
    fn greeting(&self) -> String {
        self.text.clone()
    }
}
