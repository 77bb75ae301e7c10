use rand::{distributions::Alphanumeric, thread_rng, Rng};

/// Random alphanumeric string, used to name stored CV files.
pub fn generate_file_token(length: usize) -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_has_requested_length() {
        assert_eq!(generate_file_token(24).len(), 24);
    }
}
