mod http;
mod provider;

pub use self::{http::Api as HttpProvider, provider::InvoiceProvider};
