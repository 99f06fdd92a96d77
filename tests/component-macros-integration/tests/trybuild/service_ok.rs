use component_macros::service;
use infrastructure_common::{Lifetime, Registrable};

pub trait Clock: Send + Sync {
    fn now(&self) -> u64;
}

#[derive(Debug, Default)]
#[service(scoped, implements(dyn Clock))]
struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        0
    }
}

fn main() {
    let candidate = SystemClock::candidate();
    assert_eq!(candidate.capabilities().len(), 1);
    assert_eq!(candidate.markers()[0].lifetime(), Some(Lifetime::Scoped));
}
