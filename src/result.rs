extern crate anyhow;
extern crate image;
extern crate reqwest;
extern crate serde_json;
extern crate std;

pub type BartDashResult<T> = std::result::Result<T, BartDashError>;

#[derive(Debug)]
pub enum BartDashError {
    Config(String),
    DuplicateArrival(u32),
    Fetch(reqwest::Error),
    Image(image::ImageError),
    Io(std::io::Error),
    Json(serde_json::Error),
    Other(anyhow::Error),
    Parse { field: &'static str, value: String },
    UnknownColor(String),
}

pub fn make_error(msg: &str) -> BartDashError {
    return BartDashError::Other(anyhow::anyhow!("{}", msg));
}

impl BartDashError {
    // Errors that only spoil the current poll cycle.
    pub fn is_recoverable_feed_error(&self) -> bool {
        match *self {
            BartDashError::Fetch(_)
                | BartDashError::Json(_)
                | BartDashError::Parse { .. }
                | BartDashError::DuplicateArrival(_) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for BartDashError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            BartDashError::Config(ref msg) => {
                return write!(f, "Config Error: {}", msg);
            },
            BartDashError::DuplicateArrival(minutes) => {
                return write!(f, "Duplicate Arrival: two departures at {} min", minutes);
            },
            BartDashError::Fetch(ref err) => {
                return write!(f, "Fetch Error: {}", err);
            },
            BartDashError::Image(ref err) => {
                return write!(f, "Image Error: {}", err);
            },
            BartDashError::Io(ref err) => {
                return write!(f, "IO Error: {}", err);
            },
            BartDashError::Json(ref err) => {
                return write!(f, "JSON Error: {}", err);
            },
            BartDashError::Other(ref err) => {
                return write!(f, "Error: {:#}", err);
            },
            BartDashError::Parse { field, ref value } => {
                return write!(f, "Parse Error: bad {} '{}'", field, value);
            },
            BartDashError::UnknownColor(ref name) => {
                return write!(f, "Unknown Color: '{}'", name);
            },
        }
    }
}

impl std::error::Error for BartDashError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            BartDashError::Fetch(ref err) => Some(err),
            BartDashError::Image(ref err) => Some(err),
            BartDashError::Io(ref err) => Some(err),
            BartDashError::Json(ref err) => Some(err),
            _ => None,
        }
    }
}

impl From<anyhow::Error> for BartDashError {
    fn from(err: anyhow::Error) -> BartDashError {
        return BartDashError::Other(err);
    }
}

impl From<image::ImageError> for BartDashError {
    fn from(err: image::ImageError) -> BartDashError {
        return BartDashError::Image(err);
    }
}

impl From<reqwest::Error> for BartDashError {
    fn from(err: reqwest::Error) -> BartDashError {
        return BartDashError::Fetch(err);
    }
}

impl From<serde_json::Error> for BartDashError {
    fn from(err: serde_json::Error) -> BartDashError {
        return BartDashError::Json(err);
    }
}

impl From<std::io::Error> for BartDashError {
    fn from(err: std::io::Error) -> BartDashError {
        return BartDashError::Io(err);
    }
}
