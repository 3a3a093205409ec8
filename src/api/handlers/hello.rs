//! Terminal handler at the end of the redirect chain.

/// Answers every request that no lookup source could resolve.
///
/// # Response
///
/// `200 OK` with body `Hello, world!\n`.
pub async fn hello_handler() -> &'static str {
    "Hello, world!\n"
}
