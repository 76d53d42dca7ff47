//! Resource trait for declarative state management
//!
//! A Resource describes one kind of remote object: how it is identified,
//! which commands bring it into a desired shape, and how its actual state
//! is read back.

use crate::command::Command;
use crate::types::Removal;
use sshexec::Execute;
use std::fmt;

/// Errors a resource kind can produce.
///
/// Reading an object that does not exist must be distinguishable from a
/// transport failure, so callers can decide to create it.
pub trait ResourceError: std::error::Error + From<sshexec::Error> + Send + Sync + 'static {
    /// Whether the remote object is absent.
    fn is_not_found(&self) -> bool;
}

/// Core trait for a kind of remote resource
///
/// Implementations are stateless markers: every function receives what it
/// needs as arguments, and [`read`](Self::read) is the only one touching
/// the remote side. Command builders are pure so plans can be shown
/// without running them.
///
/// # Example
///
/// ```ignore
/// use declarative::{Command, Removal, Resource};
///
/// struct Label;
///
/// impl Resource for Label {
///     const KIND: &'static str = "label";
///     type Id = String;
///     type Desired = String;
///     type State = String;
///     type Error = MyError;
///
///     fn identity(desired: &String) -> String { desired.clone() }
///     fn parse_id(raw: &str) -> Result<String, MyError> { Ok(raw.to_string()) }
///     fn create_commands(desired: &String) -> Vec<Command> {
///         vec![Command::new("label create").arg(desired)]
///     }
///     fn update_commands(_: &String, _: &String) -> Vec<Command> { Vec::new() }
///     fn removal(id: &String) -> Removal {
///         Removal::Command(Command::new("label delete").arg(id))
///     }
///     fn read(remote: &dyn sshexec::Execute, id: &String) -> Result<String, MyError> {
///         Ok(remote.execute(&format!("label info {id}"))?)
///     }
/// }
/// ```
pub trait Resource {
    /// Kind name used in logs and import errors, e.g. `"repository"`
    const KIND: &'static str;

    /// Immutable identity of one object
    type Id: Clone + fmt::Debug + fmt::Display;

    /// What the operator asks for
    type Desired: fmt::Debug;

    /// What the remote reports
    type State: Clone + fmt::Debug;

    /// Failure type for reads and commands
    type Error: ResourceError;

    /// Identity of the object a desired snapshot describes.
    fn identity(desired: &Self::Desired) -> Self::Id;

    /// Parse an operator-supplied import identifier.
    fn parse_id(raw: &str) -> Result<Self::Id, Self::Error>;

    /// Commands creating the object, followed by any commands for fields
    /// that cannot be set at creation time.
    fn create_commands(desired: &Self::Desired) -> Vec<Command>;

    /// One command per field where `desired` differs from `prior`.
    ///
    /// An empty list means the object already converged.
    fn update_commands(desired: &Self::Desired, prior: &Self::State) -> Vec<Command>;

    /// How the object is removed.
    fn removal(id: &Self::Id) -> Removal;

    /// Query the remote and build the actual state.
    fn read(remote: &dyn Execute, id: &Self::Id) -> Result<Self::State, Self::Error>;
}
