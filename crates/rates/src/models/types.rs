/// Currency code (ISO 4217-like, e.g. "USD")
pub type CurrencyCode = String;
