//! Sequential short code generator with persisted state.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::domain::entities::{GeneratorState, ShortCode};
use crate::domain::repositories::GeneratorStateRepository;
use crate::error::AppError;
use crate::utils::alphabet::Alphabet;

/// Issues short codes in enumeration order over an [`Alphabet`].
///
/// The current code lives behind an async mutex. One critical section covers
/// reading the current code, computing its successor and saving the successor,
/// so concurrent callers never receive the same code.
///
/// The successor is saved before the code is handed out. If the save fails the
/// in-memory state is left untouched and the call fails, which means a restart
/// can never hand out a code that was already served.
pub struct SequenceGenerator {
    alphabet: Alphabet,
    reserved: HashSet<String>,
    state_repository: Arc<dyn GeneratorStateRepository>,
    current: Mutex<ShortCode>,
}

impl SequenceGenerator {
    /// Loads the persisted state, initializing it to the first code if absent.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] if the state cannot be read or the
    /// initial state cannot be saved, and [`AppError::Internal`] if the stored
    /// code contains symbols outside `alphabet`.
    pub async fn load(
        alphabet: Alphabet,
        state_repository: Arc<dyn GeneratorStateRepository>,
    ) -> Result<Self, AppError> {
        let current = match state_repository.load().await? {
            Some(state) => {
                let code = alphabet.parse_code(state.next_code.as_str())?;
                info!("Resuming short code sequence at {}", code);
                code
            }
            None => {
                let first = alphabet.first_code();
                state_repository
                    .save(GeneratorState::new(first.clone()))
                    .await?;
                info!("Initialized short code sequence at {}", first);
                first
            }
        };

        Ok(Self {
            alphabet,
            reserved: HashSet::new(),
            state_repository,
            current: Mutex::new(current),
        })
    }

    /// Codes that must never be issued (for example, paths of fixed routes).
    pub fn with_reserved<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reserved.extend(codes.into_iter().map(Into::into));
        self
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Returns the code the next call to [`Self::next`] would issue, ignoring
    /// reserved-code skipping.
    pub async fn peek(&self) -> ShortCode {
        self.current.lock().await.clone()
    }

    /// Issues the current code and advances the sequence.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] if the advanced state could not be
    /// saved. The sequence does not advance in that case.
    pub async fn next(&self) -> Result<ShortCode, AppError> {
        let mut current = self.current.lock().await;

        let mut issued = current.clone();
        while self.reserved.contains(issued.as_str()) {
            debug!("Skipping reserved short code {}", issued);
            issued = self.alphabet.successor(&issued)?;
        }

        let advanced = self.alphabet.successor(&issued)?;
        self.state_repository
            .save(GeneratorState::new(advanced.clone()))
            .await?;

        *current = advanced;
        debug!("Issued short code {}", issued);

        Ok(issued)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockGeneratorStateRepository;

    fn code(s: &str) -> ShortCode {
        ShortCode::new_unchecked(s)
    }

    fn repo_with_state(start: &str) -> MockGeneratorStateRepository {
        let mut repo = MockGeneratorStateRepository::new();
        let state = GeneratorState::new(code(start));
        repo.expect_load()
            .times(1)
            .returning(move || Ok(Some(state.clone())));
        repo
    }

    #[tokio::test]
    async fn test_load_initializes_absent_state() {
        let mut repo = MockGeneratorStateRepository::new();
        repo.expect_load().times(1).returning(|| Ok(None));
        repo.expect_save()
            .withf(|state| state.next_code.as_str() == "0")
            .times(1)
            .returning(|_| Ok(()));

        let generator = SequenceGenerator::load(Alphabet::default(), Arc::new(repo))
            .await
            .unwrap();

        assert_eq!(generator.peek().await.as_str(), "0");
    }

    #[tokio::test]
    async fn test_load_resumes_persisted_state() {
        let repo = repo_with_state("aZ");

        let generator = SequenceGenerator::load(Alphabet::default(), Arc::new(repo))
            .await
            .unwrap();

        assert_eq!(generator.peek().await.as_str(), "aZ");
    }

    #[tokio::test]
    async fn test_load_rejects_corrupt_state() {
        let repo = repo_with_state("a.b");

        let result = SequenceGenerator::load(Alphabet::default(), Arc::new(repo)).await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_load_fails_when_initial_save_fails() {
        let mut repo = MockGeneratorStateRepository::new();
        repo.expect_load().times(1).returning(|| Ok(None));
        repo.expect_save()
            .times(1)
            .returning(|_| Err(AppError::persistence("disk full")));

        let result = SequenceGenerator::load(Alphabet::default(), Arc::new(repo)).await;

        assert!(matches!(result, Err(AppError::Persistence { .. })));
    }

    #[tokio::test]
    async fn test_next_issues_current_and_saves_successor() {
        let mut repo = repo_with_state("0");
        repo.expect_save()
            .withf(|state| state.next_code.as_str() == "1")
            .times(1)
            .returning(|_| Ok(()));

        let generator = SequenceGenerator::load(Alphabet::default(), Arc::new(repo))
            .await
            .unwrap();

        assert_eq!(generator.next().await.unwrap().as_str(), "0");
        assert_eq!(generator.peek().await.as_str(), "1");
    }

    #[tokio::test]
    async fn test_next_overflow_on_binary_alphabet() {
        let mut repo = repo_with_state("1");
        repo.expect_save()
            .withf(|state| state.next_code.as_str() == "00")
            .times(1)
            .returning(|_| Ok(()));

        let alphabet = Alphabet::new(['0', '1']).unwrap();
        let generator = SequenceGenerator::load(alphabet, Arc::new(repo))
            .await
            .unwrap();

        assert_eq!(generator.next().await.unwrap().as_str(), "1");
        assert_eq!(generator.peek().await.as_str(), "00");
    }

    #[tokio::test]
    async fn test_next_overflow_on_default_alphabet() {
        let mut repo = repo_with_state("ZZ");
        repo.expect_save()
            .withf(|state| state.next_code.as_str() == "000")
            .times(1)
            .returning(|_| Ok(()));

        let generator = SequenceGenerator::load(Alphabet::default(), Arc::new(repo))
            .await
            .unwrap();

        assert_eq!(generator.next().await.unwrap().as_str(), "ZZ");
        assert_eq!(generator.peek().await.as_str(), "000");
    }

    #[tokio::test]
    async fn test_save_failure_does_not_advance() {
        let mut repo = repo_with_state("a0");
        let mut seq = mockall::Sequence::new();
        repo.expect_save()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(AppError::persistence("connection reset")));
        repo.expect_save()
            .withf(|state| state.next_code.as_str() == "a1")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let generator = SequenceGenerator::load(Alphabet::default(), Arc::new(repo))
            .await
            .unwrap();

        let failed = generator.next().await;
        assert!(matches!(failed, Err(AppError::Persistence { .. })));
        assert_eq!(generator.peek().await.as_str(), "a0");

        // The code that failed to persist is issued by the next successful call.
        assert_eq!(generator.next().await.unwrap().as_str(), "a0");
        assert_eq!(generator.peek().await.as_str(), "a1");
    }

    #[tokio::test]
    async fn test_reserved_codes_are_skipped() {
        let alphabet = Alphabet::new(['0', '1']).unwrap();
        let mut repo = repo_with_state("0");
        repo.expect_save()
            .withf(|state| state.next_code.as_str() == "00")
            .times(1)
            .returning(|_| Ok(()));

        let generator = SequenceGenerator::load(alphabet, Arc::new(repo))
            .await
            .unwrap()
            .with_reserved(["0"]);

        assert_eq!(generator.next().await.unwrap().as_str(), "1");
        assert_eq!(generator.peek().await.as_str(), "00");
    }

    #[tokio::test]
    async fn test_sequential_calls_are_strictly_increasing() {
        let mut repo = repo_with_state("0");
        repo.expect_save().times(300).returning(|_| Ok(()));

        let alphabet = Alphabet::default();
        let generator = SequenceGenerator::load(alphabet.clone(), Arc::new(repo))
            .await
            .unwrap();

        let mut previous = generator.next().await.unwrap();
        for _ in 1..300 {
            let next = generator.next().await.unwrap();
            assert_eq!(
                alphabet.compare(&previous, &next).unwrap(),
                std::cmp::Ordering::Less
            );
            previous = next;
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_calls_never_duplicate() {
        const TASKS: usize = 32;
        const PER_TASK: usize = 25;

        let mut repo = repo_with_state("0");
        repo.expect_save()
            .times(TASKS * PER_TASK)
            .returning(|_| Ok(()));

        let generator = Arc::new(
            SequenceGenerator::load(Alphabet::default(), Arc::new(repo))
                .await
                .unwrap(),
        );

        let mut handles = Vec::with_capacity(TASKS);
        for _ in 0..TASKS {
            let generator = Arc::clone(&generator);
            handles.push(tokio::spawn(async move {
                let mut codes = Vec::with_capacity(PER_TASK);
                for _ in 0..PER_TASK {
                    codes.push(generator.next().await.unwrap());
                }
                codes
            }));
        }

        let mut all = HashSet::new();
        for handle in handles {
            for code in handle.await.unwrap() {
                assert!(all.insert(code), "duplicate short code issued");
            }
        }

        assert_eq!(all.len(), TASKS * PER_TASK);
    }
}
