mod stub;

pub use stub::StubScript;
