//! Payload size check, run before any decoding or model work

use super::PredictionError;

/// Largest accepted image payload (1 MiB)
///
/// The HTTP body limit uses the same value.
pub const MAX_IMAGE_BYTES: usize = 1_048_576;

/// Pass the payload through unchanged, or reject it when it exceeds [`MAX_IMAGE_BYTES`]
pub fn validate(bytes: &[u8]) -> Result<&[u8], PredictionError> {
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(PredictionError::ImageTooLarge { size: bytes.len() });
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_empty_and_limit_sized_payloads() {
        assert!(validate(&[]).is_ok());
        let at_limit = vec![0u8; MAX_IMAGE_BYTES];
        assert_eq!(validate(&at_limit).unwrap().len(), MAX_IMAGE_BYTES);
    }

    #[test]
    fn test_rejects_one_byte_over_limit() {
        let over = vec![0u8; MAX_IMAGE_BYTES + 1];
        let err = validate(&over).unwrap_err();
        assert!(matches!(
            err,
            PredictionError::ImageTooLarge { size } if size == MAX_IMAGE_BYTES + 1
        ));
        assert_eq!(err.to_string(), "image too large, maximum 1MB");
    }
}
