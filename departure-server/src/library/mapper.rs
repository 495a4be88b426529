//! Conversion from upstream records to domain types.
//!
//! Everything here is pure: no upstream calls are made except through the
//! final-stop callback the caller passes in.

use std::str::FromStr;

use crate::domain::{Departure, Position, Station, parse_board_datetime};
use crate::provider::Record;

use super::error::MappingError;

/// Convert upstream `(x, y)` coordinates to a position.
///
/// Rejseplanen's `x` is the east-west axis and `y` the north-south axis, so
/// `x` is longitude and `y` latitude. This function and
/// [`xy_from_position`] are the only places that know the axis order.
pub fn position_from_xy(x: i64, y: i64) -> Position {
    Position::new(y, x)
}

/// Convert a position to upstream `(x, y)` coordinates.
pub fn xy_from_position(position: Position) -> (i64, i64) {
    (position.longitude, position.latitude)
}

fn required<'a>(record: &'a Record, field: &'static str) -> Result<&'a str, MappingError> {
    record.get(field).ok_or(MappingError::MissingField(field))
}

fn number<T: FromStr>(record: &Record, field: &'static str) -> Result<T, MappingError> {
    let value = required(record, field)?;
    value.parse().map_err(|_| MappingError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

/// The realtime field if the record has one, else the scheduled field.
fn realtime_or_scheduled<'a>(
    record: &'a Record,
    realtime: &'static str,
    scheduled: &'static str,
) -> Result<&'a str, MappingError> {
    match record.get(realtime) {
        Some(value) => Ok(value),
        None => required(record, scheduled),
    }
}

/// A record is cancelled when it carries a `cancelled` flag other than
/// `"false"`.
pub fn is_cancelled(record: &Record) -> bool {
    record.get("cancelled").is_some_and(|flag| flag != "false")
}

/// Build a station from a record with `id`, `name`, `x` and `y`.
pub fn station_from_record(record: &Record) -> Result<Station, MappingError> {
    let id = number(record, "id")?;
    let name = required(record, "name")?;
    let position = position_from_xy(number(record, "x")?, number(record, "y")?);

    Ok(Station::new(id, name, position))
}

/// Build a departure from a departure board record.
///
/// Returns `Ok(None)` for cancelled departures. When the record names a
/// final stop, `resolve_final_stop` is called once with that name; without a
/// `finalStop` field it is not called and the final stop is `None`.
pub fn departure_from_record<F, E>(
    record: &Record,
    station: &Station,
    mut resolve_final_stop: F,
) -> Result<Option<Departure>, E>
where
    F: FnMut(&str) -> Result<Option<Station>, E>,
    E: From<MappingError>,
{
    if is_cancelled(record) {
        return Ok(None);
    }

    let name = required(record, "name")?;
    let departure_type = required(record, "type")?;
    let time = realtime_or_scheduled(record, "rtTime", "time")?;
    let date = realtime_or_scheduled(record, "rtDate", "date")?;
    let time = parse_board_datetime(date, time).map_err(MappingError::from)?;
    let direction = record.get("direction").unwrap_or_default();

    let final_stop = match record.get("finalStop") {
        Some(final_stop) => resolve_final_stop(final_stop)?,
        None => None,
    };

    Ok(Some(Departure {
        station: station.clone(),
        name: name.to_string(),
        departure_type: departure_type.to_string(),
        time,
        direction: direction.to_string(),
        final_stop,
    }))
}

/// Map a whole departure board, dropping cancelled departures.
///
/// Departures keep the provider's order.
pub fn departures_from_board<F, E>(
    records: &[Record],
    station: &Station,
    mut resolve_final_stop: F,
) -> Result<Vec<Departure>, E>
where
    F: FnMut(&str) -> Result<Option<Station>, E>,
    E: From<MappingError>,
{
    let mut departures = Vec::with_capacity(records.len());
    for record in records {
        if let Some(departure) = departure_from_record(record, station, &mut resolve_final_stop)? {
            departures.push(departure);
        }
    }
    Ok(departures)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn departure_record() -> Record {
        Record::new("Departure")
            .with_field("name", "ØR 2037")
            .with_field("type", "TOG")
            .with_field("time", "10:11")
            .with_field("date", "07.07.15")
    }

    fn no_final_stop(_: &str) -> Result<Option<Station>, MappingError> {
        panic!("final stop lookup not expected")
    }

    fn at(day: u32, hour: u32, minute: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2015, 7, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn axis_conversion_is_symmetric() {
        let position = position_from_xy(12565796, 55673063);
        assert_eq!(position, Position::new(55673063, 12565796));
        assert_eq!(xy_from_position(position), (12565796, 55673063));
    }

    #[test]
    fn station_fields_are_taken_verbatim() {
        let record = Record::new("StopLocation")
            .with_field("id", "10844")
            .with_field("name", "Hovedbanegården, Tivoli")
            .with_field("x", "12566191")
            .with_field("y", "55672838");

        let station = station_from_record(&record).unwrap();
        assert_eq!(
            station,
            Station::new(
                10844,
                "Hovedbanegården, Tivoli",
                Position::new(55672838, 12566191)
            )
        );
    }

    #[test]
    fn station_without_id_is_an_error() {
        let record = Record::new("CoordLocation")
            .with_field("name", "Somewhere")
            .with_field("x", "1")
            .with_field("y", "2");
        assert_eq!(
            station_from_record(&record),
            Err(MappingError::MissingField("id"))
        );
    }

    #[test]
    fn station_with_fractional_coordinate_is_an_error() {
        let record = Record::new("StopLocation")
            .with_field("id", "1")
            .with_field("name", "Somewhere")
            .with_field("x", "12.5")
            .with_field("y", "2");
        assert!(matches!(
            station_from_record(&record),
            Err(MappingError::InvalidNumber { field: "x", .. })
        ));
    }

    #[test]
    fn scheduled_time_used_without_realtime() {
        let departure = departure_from_record(&departure_record(), &Station::stub(1), no_final_stop)
            .unwrap()
            .unwrap();

        assert_eq!(departure.name, "ØR 2037");
        assert_eq!(departure.departure_type, "TOG");
        assert_eq!(departure.time, at(7, 10, 11));
        assert_eq!(departure.direction, "");
        assert_eq!(departure.final_stop, None);
        assert_eq!(departure.station, Station::stub(1));
    }

    #[test]
    fn realtime_pair_wins() {
        let record = departure_record()
            .with_field("rtTime", "10:20")
            .with_field("rtDate", "08.07.15");
        let departure = departure_from_record(&record, &Station::stub(1), no_final_stop)
            .unwrap()
            .unwrap();
        assert_eq!(departure.time, at(8, 10, 20));
    }

    #[test]
    fn realtime_fields_are_preferred_independently() {
        let record = departure_record().with_field("rtTime", "10:25");
        let departure = departure_from_record(&record, &Station::stub(1), no_final_stop)
            .unwrap()
            .unwrap();
        assert_eq!(departure.time, at(7, 10, 25));
    }

    #[test]
    fn cancelled_flag_drops_departure() {
        let record = departure_record().with_field("cancelled", "true");
        let departure = departure_from_record(&record, &Station::stub(1), no_final_stop).unwrap();
        assert_eq!(departure, None);
    }

    #[test]
    fn cancelled_false_keeps_departure() {
        let record = departure_record().with_field("cancelled", "false");
        let departure = departure_from_record(&record, &Station::stub(1), no_final_stop).unwrap();
        assert!(departure.is_some());
    }

    #[test]
    fn final_stop_is_resolved_by_name() {
        let record = departure_record().with_field("finalStop", "Helsingør St.");
        let helsingor = Station::new(8600683, "Helsingør St.", Position::new(56035535, 12611613));

        let mut lookups = Vec::new();
        let departure = departure_from_record(&record, &Station::stub(1), |name: &str| {
            lookups.push(name.to_string());
            Ok::<_, MappingError>(Some(helsingor.clone()))
        })
        .unwrap()
        .unwrap();

        assert_eq!(lookups, ["Helsingør St."]);
        assert_eq!(departure.final_stop, Some(helsingor));
    }

    #[test]
    fn unresolvable_final_stop_is_none() {
        let record = departure_record().with_field("finalStop", "Nowhere");
        let departure =
            departure_from_record(&record, &Station::stub(1), |_: &str| Ok::<_, MappingError>(None))
                .unwrap()
                .unwrap();
        assert_eq!(departure.final_stop, None);
    }

    #[test]
    fn missing_type_is_an_error() {
        let record = Record::new("Departure")
            .with_field("name", "Re 2221")
            .with_field("time", "10:11")
            .with_field("date", "07.07.15");
        let result = departure_from_record(&record, &Station::stub(1), no_final_stop);
        assert_eq!(result, Err(MappingError::MissingField("type")));
    }

    #[test]
    fn garbled_date_is_an_error() {
        let record = departure_record().with_field("rtDate", "8/7/15");
        let result = departure_from_record(&record, &Station::stub(1), no_final_stop);
        assert!(matches!(result, Err(MappingError::InvalidTime(_))));
    }

    #[test]
    fn board_drops_cancelled_and_keeps_order() {
        let records = vec![
            departure_record().with_field("name", "A"),
            departure_record()
                .with_field("name", "B")
                .with_field("cancelled", "true"),
            departure_record()
                .with_field("name", "C")
                .with_field("time", "09:00"),
            departure_record()
                .with_field("name", "D")
                .with_field("cancelled", "false"),
        ];

        let departures = departures_from_board(&records, &Station::stub(1), no_final_stop).unwrap();
        let names: Vec<_> = departures.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["A", "C", "D"]);
    }

    #[test]
    fn board_fails_on_first_malformed_record() {
        let records = vec![departure_record(), Record::new("Departure")];
        let result = departures_from_board(&records, &Station::stub(1), no_final_stop);
        assert_eq!(result, Err(MappingError::MissingField("name")));
    }
}
