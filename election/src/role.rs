use std::fmt;

/// All possible roles of a node participating in leader election.
#[derive(Debug, Clone, Copy, Default)]
#[derive(PartialEq, Eq, Hash)]
#[derive(serde::Deserialize, serde::Serialize)]
pub enum Role {
    /// The node is following a leader.
    #[default]
    Follower,
    /// The node is campaigning to become the leader.
    Candidate,
    /// The node is the elected leader.
    Leader,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Follower => write!(f, "Follower"),
            Role::Candidate => write!(f, "Candidate"),
            Role::Leader => write!(f, "Leader"),
        }
    }
}
