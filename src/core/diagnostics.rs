//=========================================================================
// Diagnostics
//=========================================================================
//
// Injected logging capability for the coordinator.
//
// Architecture:
//   Diagnostics ──Record──> Arc<dyn log::Log>
//                               ├─ GlobalLogger → log::logger()
//                               └─ any caller-supplied logger (tests)
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::sync::Arc;

use log::{Level, Log, Metadata, Record};

//=== GlobalLogger ========================================================

/// Forwards records to whatever logger is installed process-wide.
struct GlobalLogger;

impl Log for GlobalLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level() && log::logger().enabled(metadata)
    }

    fn log(&self, record: &Record<'_>) {
        log::logger().log(record)
    }

    fn flush(&self) {
        log::logger().flush()
    }
}

//=== Diagnostics =========================================================

/// Cloneable handle through which the coordinator reports diagnostics.
///
/// # Examples
///
/// ```rust
/// # use aetheric_gamekit::core::Diagnostics;
/// let diagnostics = Diagnostics::global().with_target("menu");
/// diagnostics.warn(format_args!("no surface attached"));
/// ```
#[derive(Clone)]
pub struct Diagnostics {
    logger: Arc<dyn Log>,
    target: &'static str,
}

impl Diagnostics {
    /// Default log target for coordinator records.
    pub const DEFAULT_TARGET: &'static str = "coordinator";

    //--- Construction -----------------------------------------------------

    /// Routes records to the process-wide `log` facade.
    pub fn global() -> Self {
        Self::with_logger(Arc::new(GlobalLogger))
    }

    /// Routes records to `logger` only.
    pub fn with_logger(logger: Arc<dyn Log>) -> Self {
        Self {
            logger,
            target: Self::DEFAULT_TARGET,
        }
    }

    /// Overrides the target attached to every record.
    pub fn with_target(mut self, target: &'static str) -> Self {
        self.target = target;
        self
    }

    //--- Emission ---------------------------------------------------------

    pub fn warn(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Warn, args);
    }

    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Info, args);
    }

    pub fn debug(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Debug, args);
    }

    /// Builds a record and hands it to the logger if it is enabled.
    pub fn emit(&self, level: Level, args: fmt::Arguments<'_>) {
        let metadata = Metadata::builder().level(level).target(self.target).build();
        if !self.logger.enabled(&metadata) {
            return;
        }

        self.logger.log(
            &Record::builder()
                .metadata(metadata)
                .args(args)
                .module_path_static(Some(module_path!()))
                .build(),
        );
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::global()
    }
}

impl fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostics").field("target", &self.target).finish()
    }
}

//=========================================================================
// Test Support
//=========================================================================

/// Logger capturing records in memory.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct CapturingLogger {
    records: std::sync::Mutex<Vec<(Level, String)>>,
}

#[cfg(test)]
impl CapturingLogger {
    pub(crate) fn records(&self) -> Vec<(Level, String)> {
        self.records.lock().unwrap().clone()
    }

    /// Forgets everything captured so far.
    pub(crate) fn clear(&self) {
        self.records.lock().unwrap().clear();
    }

    /// Captured messages at `level`.
    pub(crate) fn messages(&self, level: Level) -> Vec<String> {
        self.records()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, message)| message)
            .collect()
    }
}

#[cfg(test)]
impl Log for CapturingLogger {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        self.records
            .lock()
            .unwrap()
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

//=========================================================================
// Unit Tests
//=========================================================================
