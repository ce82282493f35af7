use alloy_primitives::Address;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::time::Duration;

// Rate limit entry - last successful dispense per address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitEntry {
    pub last_request_ms: u64,
}

/// Provisional stamp taken by [`CooldownStore::try_reserve`].
///
/// Must be finished with either `commit` (transfer went out) or `release` (anything failed).
#[derive(Debug)]
#[must_use]
pub struct Reservation {
    pub address: Address,
    stamped_at: u64,
    previous: Option<RateLimitEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoolingDown {
    pub last_request_ms: u64,
    pub retry_after_ms: u64,
}

/// Keyed store of per-address cooldowns.
///
/// `try_reserve` checks and stamps in one step, so two concurrent requests for the
/// same address cannot both get through.
pub trait CooldownStore: Send + Sync {
    fn try_reserve(
        &self,
        address: Address,
        now_ms: u64,
        cooldown: Duration,
    ) -> Result<Reservation, CoolingDown>;

    fn commit(&self, reservation: Reservation, now_ms: u64);

    fn release(&self, reservation: Reservation);

    fn last_request(&self, address: &Address) -> Option<RateLimitEntry>;

    fn len(&self) -> usize;
}

#[derive(Default)]
pub struct InMemoryCooldownStore {
    entries: DashMap<Address, RateLimitEntry>,
}

impl InMemoryCooldownStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CooldownStore for InMemoryCooldownStore {
    fn try_reserve(
        &self,
        address: Address,
        now_ms: u64,
        cooldown: Duration,
    ) -> Result<Reservation, CoolingDown> {
        let cooldown_ms = u64::try_from(cooldown.as_millis()).unwrap_or(u64::MAX);
        let stamp = RateLimitEntry {
            last_request_ms: now_ms,
        };

        // the entry guard holds the shard lock until the stamp is written
        match self.entries.entry(address) {
            Entry::Occupied(mut occupied) => {
                let last = *occupied.get();
                let elapsed = now_ms.saturating_sub(last.last_request_ms);
                if elapsed <= cooldown_ms {
                    return Err(CoolingDown {
                        last_request_ms: last.last_request_ms,
                        retry_after_ms: (cooldown_ms - elapsed).saturating_add(1),
                    });
                }
                occupied.insert(stamp);
                Ok(Reservation {
                    address,
                    stamped_at: now_ms,
                    previous: Some(last),
                })
            }
            Entry::Vacant(vacant) => {
                vacant.insert(stamp);
                Ok(Reservation {
                    address,
                    stamped_at: now_ms,
                    previous: None,
                })
            }
        }
    }

    fn commit(&self, reservation: Reservation, now_ms: u64) {
        self.entries.insert(
            reservation.address,
            RateLimitEntry {
                last_request_ms: now_ms.max(reservation.stamped_at),
            },
        );
    }

    fn release(&self, reservation: Reservation) {
        if let Entry::Occupied(mut occupied) = self.entries.entry(reservation.address) {
            // someone stamped after us, theirs wins
            if occupied.get().last_request_ms != reservation.stamped_at {
                return;
            }
            match reservation.previous {
                Some(previous) => {
                    occupied.insert(previous);
                }
                None => {
                    occupied.remove();
                }
            }
        }
    }

    fn last_request(&self, address: &Address) -> Option<RateLimitEntry> {
        self.entries.get(address).map(|entry| *entry)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
