use component_macros::service;
use infrastructure_common::{DependencyError, Registrable};

pub struct Tag;

fn connect() -> Result<Pool, DependencyError> {
    Ok(Pool { size: 4 })
}

#[service(singleton, group = "storage", markers(Tag), factory = connect)]
struct Pool {
    size: usize,
}

fn main() {
    let candidate = Pool::candidate();
    assert!(candidate.capabilities().is_empty());
    assert_eq!(candidate.markers().len(), 2);
    assert_eq!(candidate.markers()[0].group(), Some("storage"));
    let _ = Pool { size: 1 }.size;
}
