//! Centralized constants for default endpoints, UA and pacing.

use std::time::Duration;

/// Default desktop UA; the members site rejects obvious scripts.
pub(crate) const USER_AGENT: &str = concat!(
    "Mozilla/5.0 (X11; Linux x86_64) ",
    "AppleWebKit/537.36 (KHTML, like Gecko) ",
    "Chrome/122.0.0.0 Safari/537.36"
);

/// Members site root. Every endpoint path below is joined onto it.
pub(crate) const DEFAULT_BASE_URL: &str = "https://members.iracing.com/";

/// Minimum spacing between two requests.
pub(crate) const DEFAULT_MIN_INTERVAL: Duration = Duration::from_secs(2);

/// Rows per page on every paginated endpoint.
pub(crate) const NUM_ENTRIES: u32 = 25;

/* ---- session ---- */

pub(crate) const PATH_LOGIN_PAGE: &str = "membersite/login.jsp";
pub(crate) const PATH_LOGIN_FORM: &str = "membersite/Login";
pub(crate) const PATH_HOME: &str = "membersite/member/Home.do";

/// Cookie the site hands out only after a successful login.
pub(crate) const SESSION_COOKIE_MARKER: &str = "irsso_members";

/* ---- member stats ---- */

pub(crate) const PATH_DRIVER_COUNTS: &str = "membersite/member/GetDriverCounts";
pub(crate) const PATH_DRIVER_STATUS: &str = "membersite/member/GetDriverStatus";
pub(crate) const PATH_CHART_DATA: &str = "memberstats/member/GetChartData";
pub(crate) const PATH_CAREER_STATS: &str = "memberstats/member/GetCareerStats";
pub(crate) const PATH_YEARLY_STATS: &str = "memberstats/member/GetYearlyStats";
pub(crate) const PATH_LAST_RACES: &str = "memberstats/member/GetLastRacesStats";
pub(crate) const PATH_CARS_DRIVEN: &str = "memberstats/member/GetCarsDriven";
pub(crate) const PATH_PERSONAL_BESTS: &str = "memberstats/member/GetPersonalBests";

/* ---- searches ---- */

pub(crate) const PATH_DRIVER_STATS: &str = "memberstats/member/GetDriverStats";
pub(crate) const PATH_RESULTS_ARCHIVE: &str = "memberstats/member/GetResults";
pub(crate) const PATH_HOSTED_RESULTS: &str = "memberstats/member/GetPrivateSessionResults";

/* ---- results ---- */

pub(crate) const PATH_EVENT_RESULTS_CSV: &str = "memberstats/member/GetEventResultsAsCSV";
pub(crate) const PATH_EVENT_RESULT_PAGE: &str = "membersite/member/EventResult.do";
pub(crate) const PATH_SUBSESSION_RESULTS: &str = "membersite/member/GetSubsessionResults";
pub(crate) const PATH_LAPS: &str = "membersite/member/GetLaps";
pub(crate) const PATH_LAP_CHART: &str = "membersite/member/GetLapChart";
pub(crate) const PATH_WORLD_RECORDS: &str = "memberstats/member/GetWorldRecords";

/* ---- seasons ---- */

pub(crate) const PATH_SERIES_STATS_PAGE: &str = "membersite/member/statsseries.jsp";
pub(crate) const PATH_SEASON_STANDINGS: &str = "memberstats/member/GetSeasonStandings";
pub(crate) const PATH_SERIES_RACE_RESULTS: &str = "memberstats/member/GetSeriesRaceResults";
pub(crate) const PATH_SESSION_TIMES: &str = "membersite/member/GetSessionTimes";
pub(crate) const PATH_SERIES_PAGE: &str = "membersite/member/Series.do";
