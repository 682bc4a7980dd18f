use crate::token;
use std::{
    collections::HashMap,
    path::PathBuf,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

/// How many times `register` regenerates a token before giving up.
/// A collision requires two identical outputs of the CSPRNG, so reaching
/// this bound means the entropy source is broken.
const MAX_GENERATION_ATTEMPTS: u32 = 8;

/// A single registered artifact. The backing file is exclusively owned by
/// this record until the sweeper deletes it.
#[derive(Debug, Clone)]
pub struct ArtifactRecord {
    pub filename: PathBuf,
    pub created_at: Instant,
    pub expires_at: Instant,
}

impl ArtifactRecord {
    fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("entropy source unavailable: {source}")]
    Entropy {
        #[from]
        source: getrandom::Error,
    },
    #[error("token collision persisted after {attempts} attempts")]
    Collision { attempts: u32 },
}

#[derive(Debug, Default)]
struct Data {
    tokens: HashMap<String, ArtifactRecord>,
}

/// Authoritative token -> artifact mapping. Every operation takes the inner
/// lock exactly once; none of them touch the filesystem. Handles are cheap
/// to clone and share one map.
#[derive(Clone, Debug)]
pub struct TokenStore {
    data: Arc<Mutex<Data>>,
    token_length: usize,
    ttl: Duration,
}

impl TokenStore {
    pub fn new(token_length: usize, ttl: Duration) -> TokenStore {
        TokenStore {
            data: Arc::new(Mutex::new(Data::default())),
            token_length,
            ttl,
        }
    }

    /// Mints a fresh token for `filename` and inserts the record.
    /// An already-taken token is regenerated instead of overwritten.
    pub fn register(&self, filename: impl Into<PathBuf>) -> Result<String, RegisterError> {
        self.register_at(filename.into(), Instant::now())
    }

    pub(crate) fn register_at(
        &self,
        filename: PathBuf,
        now: Instant,
    ) -> Result<String, RegisterError> {
        let record = ArtifactRecord {
            filename,
            created_at: now,
            expires_at: now + self.ttl,
        };
        for _ in 0..MAX_GENERATION_ATTEMPTS {
            // entropy comes from a syscall; keep it outside the lock so a
            // slow random source never stalls concurrent redeems
            let tok = token::generate(self.token_length)?;
            let mut data = self.data.lock().unwrap();
            if data.tokens.contains_key(&tok) {
                continue;
            }
            data.tokens.insert(tok.clone(), record);
            return Ok(tok);
        }
        Err(RegisterError::Collision {
            attempts: MAX_GENERATION_ATTEMPTS,
        })
    }

    /// Resolves a token to its artifact path. Returns `None` for tokens that
    /// are unknown, malformed or expired; callers cannot tell these apart.
    /// A successful redeem leaves the record in place; tokens stay valid for
    /// repeated downloads until the TTL elapses.
    pub fn redeem(&self, token: &str) -> Option<PathBuf> {
        self.redeem_at(token, Instant::now())
    }

    pub(crate) fn redeem_at(&self, token: &str, now: Instant) -> Option<PathBuf> {
        let data = self.data.lock().unwrap();
        match data.tokens.get(token) {
            Some(rec) if !rec.is_expired_at(now) => Some(rec.filename.clone()),
            _ => None,
        }
    }

    /// Removes and returns every record whose deadline has passed as of
    /// `now`. One atomic pass: a record is returned at most once, and
    /// entries registered concurrently are either untouched or drained
    /// wholesale, never observed half-written.
    pub fn drain_expired(&self, now: Instant) -> Vec<ArtifactRecord> {
        let mut data = self.data.lock().unwrap();
        let expired: Vec<String> = data
            .tokens
            .iter()
            .filter(|(_, rec)| rec.is_expired_at(now))
            .map(|(tok, _)| tok.clone())
            .collect();
        expired
            .iter()
            .filter_map(|tok| data.tokens.remove(tok))
            .collect()
    }

    /// Number of records currently held, expired or not.
    pub fn live_count(&self) -> usize {
        self.data.lock().unwrap().tokens.len()
    }
}
