//! Domain Services
//!
//! Pure domain logic for PoW verification.

use sha2::{Digest, Sha256};

use crate::domain::entities::ProofOfWorkSolution;
use crate::domain::value_objects::Difficulty;
use crate::error::{PowError, PowResult};

/// Compute `hex(SHA-256(challenge || nonce))` over the string forms
pub fn compute_pow_hash(challenge: &str, nonce: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(challenge.as_bytes());
    hasher.update(nonce.as_bytes());
    hex::encode(hasher.finalize())
}

/// Count leading `'0'` characters of a hex digest
pub fn count_leading_zero_digits(hash_hex: &str) -> usize {
    hash_hex.bytes().take_while(|&b| b == b'0').count()
}

/// Verify that a hex digest meets the difficulty requirement
pub fn verify_difficulty(hash_hex: &str, difficulty: u8) -> bool {
    count_leading_zero_digits(hash_hex) >= usize::from(difficulty)
}

/// Verify a PoW solution at time `now` (unix seconds)
///
/// Fails when the challenge is older than `validity_secs`, when its
/// timestamp lies in the future, when the echoed difficulty is below
/// `floor`, or when the hash does not carry enough leading zeros.
pub fn verify_at(
    solution: &ProofOfWorkSolution,
    now: i64,
    validity_secs: i64,
    floor: Difficulty,
) -> PowResult<()> {
    if solution.timestamp > now {
        return Err(PowError::TimestampInFuture);
    }
    // an age that does not fit in i64 is as stale as it gets
    if now
        .checked_sub(solution.timestamp)
        .is_none_or(|age| age > validity_secs)
    {
        return Err(PowError::ChallengeExpired);
    }
    if solution.difficulty < floor.digits() {
        return Err(PowError::DifficultyTooLow {
            got: solution.difficulty,
            min: floor.digits(),
        });
    }

    let hash = compute_pow_hash(&solution.challenge, &solution.nonce);
    if !verify_difficulty(&hash, solution.difficulty) {
        return Err(PowError::InvalidNonce);
    }
    Ok(())
}

/// Brute-force the smallest decimal nonce satisfying `difficulty`
pub fn solve(challenge: &str, difficulty: u8) -> u64 {
    (0u64..)
        .find(|nonce| verify_difficulty(&compute_pow_hash(challenge, &nonce.to_string()), difficulty))
        .unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pow_hash_is_string_concatenation() {
        // sha256("abc") is the FIPS 180-2 example digest
        assert_eq!(
            compute_pow_hash("ab", "c"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_leading_zero_digits() {
        assert_eq!(count_leading_zero_digits("ffff"), 0);
        assert_eq!(count_leading_zero_digits("0fff"), 1);
        assert_eq!(count_leading_zero_digits("000a"), 3);
        assert_eq!(count_leading_zero_digits("0000"), 4);
    }

    #[test]
    fn test_verify_difficulty() {
        assert!(verify_difficulty("0000ab", 4));
        assert!(!verify_difficulty("000ab0", 4));
        assert!(verify_difficulty("abc", 0));
    }

    #[test]
    fn test_solve_then_verify() {
        let challenge = "00".repeat(32);
        let nonce = solve(&challenge, 3);
        let hash = compute_pow_hash(&challenge, &nonce.to_string());
        assert!(hash.starts_with("000"));
        // smallest nonce: nothing below it satisfies the target
        for smaller in 0..nonce {
            assert!(!verify_difficulty(
                &compute_pow_hash(&challenge, &smaller.to_string()),
                3
            ));
        }
    }
}
