use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlCanvasElement, MouseEvent};

use calendar_core::geometry::Point;

/// Log a message to the browser console.
pub fn log(s: &str) {
    web_sys::console::log_1(&JsValue::from_str(s));
}

/// Local wall-clock time read from the host `Date`, matching the local
/// midnight unlock semantics of the opening dates.
pub fn now_local() -> NaiveDateTime {
    let d = js_sys::Date::new_0();
    let date = NaiveDate::from_ymd_opt(
        d.get_full_year() as i32,
        d.get_month() + 1,
        d.get_date(),
    )
    .unwrap_or_default();
    let time = NaiveTime::from_hms_opt(d.get_hours(), d.get_minutes(), d.get_seconds())
        .unwrap_or(NaiveTime::MIN);
    date.and_time(time)
}

/// Today's local date, used to seed default opening dates.
pub fn today_local() -> NaiveDate {
    now_local().date()
}

/// Convert client coordinates into canvas internal pixel coordinates so
/// hit testing works even if CSS scales the canvas element.
pub fn event_canvas_coords(e: &MouseEvent, cv: &HtmlCanvasElement) -> Point {
    if let Some(el) = cv.dyn_ref::<web_sys::Element>() {
        let rect = el.get_bounding_client_rect();
        Point {
            x: (e.client_x() as f64 - rect.left()) * (cv.width() as f64) / rect.width().max(1.0),
            y: (e.client_y() as f64 - rect.top()) * (cv.height() as f64) / rect.height().max(1.0),
        }
    } else {
        Point {
            x: e.offset_x() as f64,
            y: e.offset_y() as f64,
        }
    }
}

/// Percent-decode a location path before routing; share codes themselves
/// use a URL-safe alphabet but pasted links may arrive escaped.
pub fn decode_path(raw: &str) -> String {
    percent_encoding::percent_decode_str(raw)
        .decode_utf8()
        .map(|s| s.to_string())
        .unwrap_or_else(|_| raw.to_string())
}
