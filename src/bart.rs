// BART legacy ETD API, e.g.
// https://api.bart.gov/api/etd.aspx?cmd=etd&orig=MONT&plat=2&key=...&json=y
// Only root.station[0] is read; the query already pins station and platform.
extern crate reqwest;
extern crate serde;
extern crate serde_json;
extern crate std;

use crate::colors;
use crate::result;
use crate::schedule;
use std::time::Duration;

// "Leaving" is what the live feed sends.
const ARRIVING_NOW_TOKENS: &[&str] = &["leaving", "arriving-now"];

#[derive(Serialize, Deserialize, Debug)]
struct EtdResponse {
    root: EtdRoot,
}

#[derive(Serialize, Deserialize, Debug)]
struct EtdRoot {
    #[serde(default)]
    station: Vec<EtdStation>,
}

#[derive(Serialize, Deserialize, Debug)]
struct EtdStation {
    #[serde(default)]
    name: String,
    #[serde(default)]
    abbr: String,
    etd: Option<Vec<EtdRoute>>,
}

#[derive(Serialize, Deserialize, Debug)]
struct EtdRoute {
    destination: String,
    #[serde(default)]
    estimate: Vec<EtdEstimate>,
}

#[derive(Serialize, Deserialize, Debug)]
struct EtdEstimate {
    minutes: String,
    length: String,
    color: String,
    #[serde(default)]
    cancelflag: Option<String>,
}

impl EtdEstimate {
    fn is_cancelled(&self) -> bool {
        return match self.cancelflag {
            None => false,
            Some(ref flag) => {
                let flag = flag.trim();
                !(flag == "0" || flag.eq_ignore_ascii_case("false"))
            },
        };
    }
}

/// Blocking fetch of one feed response.
pub trait Transport {
    fn fetch(&self, endpoint: &str, timeout: Duration) -> result::BartDashResult<String>;
}

impl<F> Transport for F where F: Fn(&str, Duration) -> result::BartDashResult<String> {
    fn fetch(&self, endpoint: &str, timeout: Duration) -> result::BartDashResult<String> {
        return self(endpoint, timeout);
    }
}

pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new() -> result::BartDashResult<HttpTransport> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("bartdash/", env!("CARGO_PKG_VERSION")))
            .build()?;
        return Ok(HttpTransport{client: client});
    }
}

impl Transport for HttpTransport {
    fn fetch(&self, endpoint: &str, timeout: Duration) -> result::BartDashResult<String> {
        debug!("Fetching {}", endpoint);
        let response = self.client.get(endpoint)
            .header(reqwest::header::ACCEPT, "*/*")
            .timeout(timeout)
            .send()?
            .error_for_status()?;
        return Ok(response.text()?);
    }
}

/// Turns ETD responses into a `Schedule`.
pub struct ScheduleParser {
    colors: colors::ColorTable,
    collisions: schedule::CollisionPolicy,
}

impl ScheduleParser {
    pub fn new(colors: colors::ColorTable, collisions: schedule::CollisionPolicy) -> ScheduleParser {
        return ScheduleParser{
            colors: colors,
            collisions: collisions,
        };
    }

    /// `Ok(None)` means the station has no departure estimates at all, which
    /// is different from a schedule that ended up empty (e.g. everything
    /// cancelled).
    pub fn parse(&self, response_body: &str) -> result::BartDashResult<Option<schedule::Schedule>> {
        let response: EtdResponse = serde_json::from_str(response_body)?;

        let station = match response.root.station.first() {
            Some(station) => station,
            None => return Ok(None),
        };
        let routes = match station.etd {
            Some(ref routes) => routes,
            None => {
                debug!("No departures listed for {} ({})", station.name, station.abbr);
                return Ok(None);
            },
        };

        let mut schedule = schedule::Schedule::new();
        for route in routes {
            for estimate in &route.estimate {
                if estimate.is_cancelled() {
                    debug!("Skipping cancelled {} train at {} min", route.destination, estimate.minutes);
                    continue;
                }
                schedule.insert(self.normalize(route, estimate)?, self.collisions)?;
            }
        }

        return Ok(Some(schedule));
    }

    fn normalize(&self, route: &EtdRoute, estimate: &EtdEstimate) -> result::BartDashResult<schedule::ScheduleEntry> {
        let line_color_code = match self.colors.lookup(&estimate.color) {
            Ok(code) => code.to_string(),
            Err(err) => {
                warn!("{} on the {} route, showing '{}'",
                      err, route.destination, self.colors.unknown_code());
                self.colors.unknown_code().to_string()
            },
        };

        return Ok(schedule::ScheduleEntry{
            arrival_minutes: parse_minutes(&estimate.minutes)?,
            destination: route.destination.clone(),
            car_count: parse_number("length", &estimate.length)?,
            line_color_code: line_color_code,
        });
    }
}

fn parse_minutes(raw: &str) -> result::BartDashResult<u32> {
    let raw = raw.trim();
    if ARRIVING_NOW_TOKENS.iter().any(|token| raw.eq_ignore_ascii_case(token)) {
        return Ok(0);
    }
    return parse_number("minutes", raw);
}

fn parse_number(field: &'static str, raw: &str) -> result::BartDashResult<u32> {
    return raw.trim().parse::<u32>().map_err(|_| result::BartDashError::Parse{
        field: field,
        value: raw.to_string(),
    });
}

#[cfg(test)]
mod tests {
    use super::ScheduleParser;
    use crate::colors::ColorTable;
    use crate::result::BartDashError;
    use crate::schedule::{entry, CollisionPolicy};

    fn parser() -> ScheduleParser {
        return ScheduleParser::new(ColorTable::bart_default(), CollisionPolicy::LastWriteWins);
    }

    fn response(estimates: &[(&str, &str, &str, &str, &str)]) -> String {
        let routes: Vec<serde_json::Value> = estimates.iter().map(|(dest, minutes, length, color, cancel)| {
            serde_json::json!({
                "destination": dest,
                "abbreviation": "XXXX",
                "estimate": [{
                    "minutes": minutes,
                    "length": length,
                    "color": color,
                    "cancelflag": cancel,
                }],
            })
        }).collect();

        return serde_json::json!({
            "root": {"station": [{"name": "Montgomery St.", "abbr": "MONT", "etd": routes}]}
        }).to_string();
    }

    #[test]
    fn golden_response() {
        let raw_json = std::fs::read_to_string("testdata/bart_etd.json")
            .expect("Error reading bart_etd.json");

        let schedule = parser().parse(&raw_json).expect("parse").expect("schedule");

        // Dublin/Pleasanton at 11 is cancelled.
        assert_eq!(vec![4, 8, 19, 23, 26], schedule.arrival_minutes());
        assert_eq!(Some(&entry(4, "Antioch", 10, "YLW")), schedule.get(4));
        assert_eq!(Some(&entry(8, "Richmond", 6, "RED")), schedule.get(8));
        assert_eq!(Some(&entry(26, "Dublin/Pleasanton", 8, "BLU")), schedule.get(26));
        assert_eq!(None, schedule.get(11));
    }

    #[test]
    fn leaving_train_is_zero_minutes() {
        let raw_json = std::fs::read_to_string("testdata/bart_etd_leaving.json")
            .expect("Error reading bart_etd_leaving.json");

        let schedule = parser().parse(&raw_json).unwrap().unwrap();

        assert_eq!(vec![0, 15], schedule.arrival_minutes());
        assert_eq!(Some(&entry(0, "Richmond/Antioch", 9, "RED")), schedule.imminent());
    }

    #[test]
    fn arriving_now_token() {
        let raw_json = response(&[("Richmond/Antioch", "arriving-now", "9", "RED", "0")]);
        let schedule = parser().parse(&raw_json).unwrap().unwrap();
        assert_eq!(Some(&entry(0, "Richmond/Antioch", 9, "RED")), schedule.imminent());
    }

    #[test]
    fn missing_etd_is_no_data() {
        let raw_json = std::fs::read_to_string("testdata/bart_etd_no_trains.json")
            .expect("Error reading bart_etd_no_trains.json");
        assert_eq!(None, parser().parse(&raw_json).unwrap());

        assert_eq!(None, parser().parse(r#"{"root": {"station": []}}"#).unwrap());
    }

    #[test]
    fn all_cancelled_is_an_empty_schedule() {
        let raw_json = response(&[
            ("Antioch", "3", "10", "YELLOW", "1"),
            ("Richmond", "9", "6", "RED", "true"),
        ]);

        let schedule = parser().parse(&raw_json).unwrap().expect("not the no-data sentinel");
        assert!(schedule.is_empty());
    }

    #[test]
    fn cancelled_trains_never_appear() {
        let raw_json = response(&[
            ("Antioch", "3", "10", "YELLOW", "1"),
            ("Richmond", "9", "6", "RED", "0"),
            ("Millbrae", "Leaving", "8", "RED", "1"),
            ("Daly City", "14", "8", "GREEN", "false"),
        ]);

        let schedule = parser().parse(&raw_json).unwrap().unwrap();
        assert_eq!(vec![9, 14], schedule.arrival_minutes());
        assert!(schedule.entries().all(|e| e.destination != "Antioch" && e.destination != "Millbrae"));
    }

    #[test]
    fn duplicate_minutes_keep_the_later_departure() {
        let raw_json = response(&[
            ("Antioch", "7", "10", "YELLOW", "0"),
            ("Richmond", "7", "6", "RED", "0"),
        ]);

        let schedule = parser().parse(&raw_json).unwrap().unwrap();
        assert_eq!(1, schedule.len());
        assert_eq!(Some(&entry(7, "Richmond", 6, "RED")), schedule.get(7));
    }

    #[test]
    fn strict_mode_rejects_duplicate_minutes() {
        let raw_json = response(&[
            ("Antioch", "7", "10", "YELLOW", "0"),
            ("Richmond", "7", "6", "RED", "0"),
        ]);

        let strict = ScheduleParser::new(ColorTable::bart_default(), CollisionPolicy::Reject);
        match strict.parse(&raw_json) {
            Err(BartDashError::DuplicateArrival(7)) => {},
            other => panic!("expected a duplicate error, got {:?}", other),
        }
    }

    #[test]
    fn unknown_color_gets_the_default_code() {
        let raw_json = response(&[
            ("Berryessa", "5", "10", "PURPLE", "0"),
            ("Richmond", "9", "6", "red", "0"),
        ]);

        let schedule = parser().parse(&raw_json).unwrap().unwrap();
        assert_eq!(Some(&entry(5, "Berryessa", 10, "?")), schedule.get(5));
        assert_eq!(Some(&entry(9, "Richmond", 6, "RED")), schedule.get(9));
    }

    #[test]
    fn bad_numbers_are_parse_errors() {
        match parser().parse(&response(&[("Antioch", "soon", "10", "YELLOW", "0")])) {
            Err(BartDashError::Parse{field: "minutes", value}) => assert_eq!("soon", value),
            other => panic!("expected a parse error, got {:?}", other),
        }

        match parser().parse(&response(&[("Antioch", "4", "ten", "YELLOW", "0")])) {
            Err(BartDashError::Parse{field: "length", value}) => assert_eq!("ten", value),
            other => panic!("expected a parse error, got {:?}", other),
        }

        match parser().parse(&response(&[("Antioch", "-3", "10", "YELLOW", "0")])) {
            Err(BartDashError::Parse{field: "minutes", ..}) => {},
            other => panic!("expected a parse error, got {:?}", other),
        }
    }

    #[test]
    fn malformed_json_is_an_error() {
        match parser().parse("<html>502 Bad Gateway</html>") {
            Err(BartDashError::Json(_)) => {},
            other => panic!("expected a json error, got {:?}", other),
        }
    }

    #[test]
    fn keys_are_strictly_ascending() {
        let raw_json = response(&[
            ("Antioch", "31", "10", "YELLOW", "0"),
            ("Richmond", "2", "6", "RED", "0"),
            ("Millbrae", "17", "8", "RED", "0"),
            ("Daly City", "9", "8", "GREEN", "0"),
        ]);

        let keys = parser().parse(&raw_json).unwrap().unwrap().arrival_minutes();
        assert!(keys.windows(2).all(|w| w[0] < w[1]), "not ascending: {:?}", keys);
    }
}
