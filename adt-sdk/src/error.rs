use thiserror::Error;

/// Returned by the read and remove operations of a container that holds no elements.
///
/// The failing operation never touches the container, so its size and storage stay exactly
/// as they were before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Container is empty")]
pub struct EmptyContainerError;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message() {
        assert_eq!(EmptyContainerError.to_string(), "Container is empty");
    }
}
