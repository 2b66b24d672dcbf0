//! I/O collaborators around the flow engine
//! Text-format graph loading and result reporting. The engine itself never
//! reads files or writes to the console; these adapters do.

pub mod loader;
pub mod reporter;

pub use self::loader::{
    load_flow_problem, load_matching_problem, FlowProblem, LoadError, MatchingProblem,
    VertexInterner,
};
pub use self::reporter::{ConsoleReporter, Outcome, RecordWriter, Reporter, SolveReport};
