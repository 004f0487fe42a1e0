//! Human-readable text for network-stack error codes and HTTP statuses.

/// Produced when the user cancels a navigation. Never shown as an error.
pub const ABORTED_CODE: i32 = -3;

/// Synthetic code for a tab that crashed past its automatic reload budget.
pub const CRASHED_CODE: i32 = -1000;

const NET_ERRORS: &[(i32, &str)] = &[
    (-1, "Request Pending"),
    (-2, "Operation Failed"),
    (-3, "Operation Aborted"),
    (-4, "Invalid Argument"),
    (-6, "File Not Found"),
    (-7, "Operation Timed Out"),
    (-10, "Access Denied"),
    (-11, "Not Implemented"),
    (-20, "Blocked By Client"),
    (-21, "Network Changed"),
    (-27, "Blocked By Response"),
    (-100, "Connection Closed"),
    (-101, "Connection Reset"),
    (-102, "Connection Refused"),
    (-103, "Connection Aborted"),
    (-104, "Connection Failed"),
    (-105, "Name Not Resolved"),
    (-106, "Internet Disconnected"),
    (-107, "SSL Protocol Error"),
    (-108, "Address Invalid"),
    (-109, "Address Unreachable"),
    (-113, "SSL Version Or Cipher Mismatch"),
    (-118, "Connection Timed Out"),
    (-130, "Proxy Connection Failed"),
    (-137, "Name Resolution Failed"),
    (-200, "Certificate Common Name Invalid"),
    (-201, "Certificate Date Invalid"),
    (-202, "Certificate Authority Invalid"),
    (-203, "Certificate Contains Errors"),
    (-206, "Certificate Revoked"),
    (-207, "Certificate Invalid"),
    (-300, "Invalid URL"),
    (-301, "Disallowed URL Scheme"),
    (-302, "Unknown URL Scheme"),
    (-310, "Too Many Redirects"),
    (-320, "Invalid Response"),
    (-324, "Empty Response"),
    (-501, "Insecure Response"),
    (CRASHED_CODE, "The page crashed repeatedly"),
];

const HTTP_STATUSES: &[(i32, &str)] = &[
    (400, "Bad Request"),
    (401, "Unauthorized"),
    (402, "Payment Required"),
    (403, "Forbidden"),
    (404, "Not Found"),
    (405, "Method Not Allowed"),
    (406, "Not Acceptable"),
    (407, "Proxy Authentication Required"),
    (408, "Request Timeout"),
    (409, "Conflict"),
    (410, "Gone"),
    (411, "Length Required"),
    (412, "Precondition Failed"),
    (413, "Payload Too Large"),
    (414, "URI Too Long"),
    (415, "Unsupported Media Type"),
    (416, "Range Not Satisfiable"),
    (417, "Expectation Failed"),
    (418, "I'm a teapot"),
    (421, "Misdirected Request"),
    (422, "Unprocessable Entity"),
    (423, "Locked"),
    (424, "Failed Dependency"),
    (425, "Too Early"),
    (426, "Upgrade Required"),
    (428, "Precondition Required"),
    (429, "Too Many Requests"),
    (431, "Request Header Fields Too Large"),
    (451, "Unavailable For Legal Reasons"),
    (500, "Internal Server Error"),
    (501, "Not Implemented"),
    (502, "Bad Gateway"),
    (503, "Service Unavailable"),
    (504, "Gateway Timeout"),
    (505, "HTTP Version Not Supported"),
    (506, "Variant Also Negotiates"),
    (507, "Insufficient Storage"),
    (508, "Loop Detected"),
    (510, "Not Extended"),
    (511, "Network Authentication Required"),
];

pub const UNKNOWN_ERROR: &str = "Unknown Error";

/// Look up the fixed text for `code`, if it has one.
pub fn lookup(code: i32) -> Option<&'static str> {
    let table = if code < 0 { NET_ERRORS } else { HTTP_STATUSES };
    table
        .iter()
        .find_map(|&(c, text)| (c == code).then_some(text))
}

/// Text to show for `code`: the table entry, else the engine's own
/// description, else "Unknown Error".
pub fn error_text(code: i32, description: &str) -> String {
    if let Some(text) = lookup(code) {
        return text.to_string();
    }
    let description = description.trim();
    if description.is_empty() {
        UNKNOWN_ERROR.to_string()
    } else {
        description.to_string()
    }
}

/// Whether an HTTP status should replace the page with an error document.
pub fn is_http_error(status: u16) -> bool {
    !(200..300).contains(&status)
}
