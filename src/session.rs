use crate::error::{Result, StockLedgerError};
use crate::schema::{DayResult, LedgerConfig, RawSheet};
use crate::StockLedgerProcessor;
use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Issued by [`LedgerSession::begin_load`]. Only the newest ticket may publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub generation: u64,
    pub loaded_at: DateTime<Utc>,
    pub days: Vec<DayResult>,
}

/// Holds the last good result of a sheet reload.
///
/// Each reload runs the whole pipeline with its own carry state. A newer
/// `begin_load` makes any outstanding ticket stale, so a slow fetch can never
/// publish over a newer one, and a failed fetch leaves the previous snapshot
/// in place.
pub struct LedgerSession {
    config: LedgerConfig,
    latest_ticket: u64,
    pending: bool,
    snapshot: Option<Snapshot>,
    last_error: Option<String>,
}

impl LedgerSession {
    pub fn new(config: LedgerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            latest_ticket: 0,
            pending: false,
            snapshot: None,
            last_error: None,
        })
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.latest_ticket += 1;
        self.pending = true;
        debug!("Starting sheet load #{}", self.latest_ticket);
        LoadTicket(self.latest_ticket)
    }

    pub fn complete_load(&mut self, ticket: LoadTicket, sheet: RawSheet) -> Result<&Snapshot> {
        self.ensure_current(ticket)?;

        let days = StockLedgerProcessor::process(&self.config, &sheet)?;
        info!(
            "Sheet load #{} published with {} day(s)",
            ticket.0,
            days.len()
        );

        self.pending = false;
        self.last_error = None;
        Ok(&*self.snapshot.insert(Snapshot {
            generation: ticket.0,
            loaded_at: Utc::now(),
            days,
        }))
    }

    /// Records an upstream fetch/parse failure. The previous snapshot stays.
    pub fn fail_load(&mut self, ticket: LoadTicket, message: impl Into<String>) -> Result<()> {
        self.ensure_current(ticket)?;

        let message = message.into();
        debug!("Sheet load #{} failed: {}", ticket.0, message);
        self.pending = false;
        self.last_error = Some(StockLedgerError::FetchFailed(message).to_string());
        Ok(())
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.pending
    }

    fn ensure_current(&self, ticket: LoadTicket) -> Result<()> {
        if ticket.0 != self.latest_ticket {
            debug!(
                "Discarding stale sheet load #{} (current #{})",
                ticket.0, self.latest_ticket
            );
            return Err(StockLedgerError::StaleLoad {
                ticket: ticket.0,
                current: self.latest_ticket,
            });
        }
        Ok(())
    }
}
