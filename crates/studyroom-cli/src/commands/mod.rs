pub mod config;
pub mod data;
pub mod goal;
pub mod notes;
pub mod quote;
pub mod stats;
pub mod timer;

use std::rc::Rc;

use studyroom_core::{KvStore, SqliteStore, SystemClock};

/// Open the shared on-disk store and the system clock.
pub fn open_env() -> Result<(Rc<dyn KvStore>, Rc<SystemClock>), Box<dyn std::error::Error>> {
    let store: Rc<dyn KvStore> = Rc::new(SqliteStore::open()?);
    Ok((store, Rc::new(SystemClock)))
}
