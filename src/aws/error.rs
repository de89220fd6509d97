//! Error helpers for AWS SDK calls

use aws_sdk_sts::error::DisplayErrorContext;

/// Wrap an SDK error with the name of the failed operation.
///
/// `DisplayErrorContext` flattens the SDK's nested source chain into a single
/// message, which keeps the service error code visible in logs.
pub fn call_failed<E>(operation: &str, err: E) -> anyhow::Error
where
    E: std::error::Error,
{
    anyhow::anyhow!("{} failed: {}", operation, DisplayErrorContext(&err))
}

/// Summarize a job failure in one line for the final log entry
pub fn format_aws_error(error: &anyhow::Error) -> String {
    let error_str = format!("{:#}", error);

    if error_str.contains("AccessDenied") || error_str.contains("UnauthorizedOperation") {
        return "Access denied. Check the IAM permissions of the running role.".to_string();
    }
    if error_str.contains("ExpiredToken") || error_str.contains("InvalidClientTokenId") {
        return "AWS credentials are invalid or expired.".to_string();
    }
    if error_str.contains("ParameterNotFound") {
        return "Configuration parameter not found in SSM Parameter Store.".to_string();
    }
    if error_str.contains("NoSuchBucket") {
        return "Report bucket does not exist.".to_string();
    }
    if error_str.contains("ResourceNotFoundException") {
        return "QuickSight resource not found. Check the account, region and namespace.".to_string();
    }
    if error_str.contains("Throttling") || error_str.contains("TooManyRequests") {
        return "Rate limit exceeded. Please try again later.".to_string();
    }

    let sanitized = error_str
        .chars()
        .filter(|c| c.is_ascii_graphic() || *c == ' ')
        .take(200)
        .collect::<String>();

    if sanitized.len() < error_str.len() {
        format!("{}...", sanitized)
    } else {
        sanitized
    }
}
