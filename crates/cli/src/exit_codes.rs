//! Process exit codes. Scripts rely on these, so values never change meaning.
//!
//! | Code | Trigger                                            |
//! |------|----------------------------------------------------|
//! | 0    | Report produced (unmatched products included)      |
//! | 2    | Wrong number of input files or unparseable options |
//! | 3    | An input file does not exist                       |
//! | 4    | An input file is not valid JSON                    |
//! | 5    | An input file is unreadable or not a JSON array    |
//! | 6    | The report file could not be written               |
//! | 7    | Configuration could not be loaded                  |

use salestotal_core::{LoadError, PipelineError};

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_USAGE: u8 = 2;
pub const EXIT_MISSING_FILE: u8 = 3;
pub const EXIT_MALFORMED_JSON: u8 = 4;
pub const EXIT_INVALID_INPUT: u8 = 5;
pub const EXIT_REPORT_WRITE: u8 = 6;
pub const EXIT_CONFIG: u8 = 7;

pub fn pipeline_exit_code(error: &PipelineError) -> u8 {
    match error {
        PipelineError::Load(LoadError::MissingFile { .. }) => EXIT_MISSING_FILE,
        PipelineError::Load(LoadError::MalformedJson { .. }) => EXIT_MALFORMED_JSON,
        PipelineError::Load(LoadError::Unreadable { .. }) | PipelineError::Document(_) => {
            EXIT_INVALID_INPUT
        }
    }
}
