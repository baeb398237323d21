use std::sync::Arc;

use tally::Tally;

pub struct State {
    pub tally: Tally,
}

impl State {
    pub fn new(tally: Tally) -> Arc<Self> {
        Arc::new(Self { tally })
    }
}
