pub mod compensating_client;
pub mod envelope;
pub mod raw_socket_client;
pub mod response_parser;
pub mod standard_client;

pub use compensating_client::{
    CompensatingClient, Settlement, VerificationContext, DEFAULT_VERIFICATION_DELAY,
};
pub use envelope::interpret;
pub use raw_socket_client::{RawSocketTransport, DEFAULT_TIMEOUT};
pub use response_parser::{parse_status_line, RawResponse, ResponseParser, StatusLine};
pub use standard_client::StandardHttpTransport;
