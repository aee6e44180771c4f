use strum_macros::{Display, EnumString};

#[derive(Clone, Copy, Debug)]
pub enum Logger {
    DevNull,
    CommandLine(Verbosity),
}

impl Logger {
    pub fn from_verbosity(verbosity: Verbosity) -> Self {
        match verbosity {
            Verbosity::Quiet => Logger::DevNull,
            _ => Logger::CommandLine(verbosity),
        }
    }

    pub fn log(&self, message: &str) {
        match self {
            Logger::DevNull => {}
            Logger::CommandLine(verbosity) => {
                if !matches!(verbosity, Verbosity::Quiet) {
                    println!("{}", message);
                }
            }
        }
    }

    pub fn log_debug(&self, message: &str) {
        match self {
            Logger::DevNull => {}
            Logger::CommandLine(verbosity) => {
                if matches!(verbosity, Verbosity::Debugging | Verbosity::DebuggingByLine) {
                    println!("{}", message);
                }
            }
        }
    }

    pub fn get_verbosity(&self) -> Verbosity {
        match self {
            Logger::DevNull => Verbosity::Quiet,
            Logger::CommandLine(verbosity) => *verbosity,
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Logger::DevNull
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum Verbosity {
    Quiet,
    Simple,
    Debugging,
    DebuggingByLine,
}
