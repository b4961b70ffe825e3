//! Study goal list.
//!
//! Plain CRUD over the `goals` record: an ordered list of
//! `{text, category, done}` entries addressed by index.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::store::{keys, read_json, write_json, KvStore};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub text: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub done: bool,
}

fn default_category() -> String {
    "Study".to_string()
}

pub struct GoalList {
    store: Rc<dyn KvStore>,
}

impl GoalList {
    pub fn new(store: Rc<dyn KvStore>) -> Self {
        Self { store }
    }

    pub fn all(&self) -> Vec<Goal> {
        read_json(self.store.as_ref(), keys::GOALS).unwrap_or_default()
    }

    pub fn add(&self, text: &str, category: &str) -> Vec<Goal> {
        let mut list = self.all();
        list.push(Goal {
            text: text.to_string(),
            category: category.to_string(),
            done: false,
        });
        self.save(&list);
        list
    }

    /// Replace the text of the goal at `index`. Returns false if the index
    /// is out of range.
    pub fn edit(&self, index: usize, text: &str) -> bool {
        let mut list = self.all();
        match list.get_mut(index) {
            Some(goal) => {
                goal.text = text.to_string();
                self.save(&list);
                true
            }
            None => false,
        }
    }

    /// Mark the goal at `index` done or not done.
    pub fn set_done(&self, index: usize, done: bool) -> bool {
        let mut list = self.all();
        match list.get_mut(index) {
            Some(goal) => {
                goal.done = done;
                self.save(&list);
                true
            }
            None => false,
        }
    }

    pub fn remove(&self, index: usize) -> Option<Goal> {
        let mut list = self.all();
        if index >= list.len() {
            return None;
        }
        let removed = list.remove(index);
        self.save(&list);
        Some(removed)
    }

    /// Drop every completed goal, keeping the rest in order.
    /// Returns how many were removed.
    pub fn clear_done(&self) -> usize {
        let mut list = self.all();
        let before = list.len();
        list.retain(|g| !g.done);
        self.save(&list);
        before - list.len()
    }

    /// `(done, total)` counts for the summary line.
    pub fn summary(&self) -> (usize, usize) {
        let list = self.all();
        let done = list.iter().filter(|g| g.done).count();
        (done, list.len())
    }

    fn save(&self, list: &[Goal]) {
        write_json(self.store.as_ref(), keys::GOALS, &list);
    }
}
