use chrono::{DateTime, Datelike, TimeZone, Utc};
use mongodb::bson::DateTime as BsonDateTime;

const MONTHS_GENITIVE: [&str; 12] = [
    "января",
    "февраля",
    "марта",
    "апреля",
    "мая",
    "июня",
    "июля",
    "августа",
    "сентября",
    "октября",
    "ноября",
    "декабря",
];

pub fn chrono_to_bson(dt: DateTime<Utc>) -> BsonDateTime {
    BsonDateTime::from_millis(dt.timestamp_millis())
}

/// Long Russian date, e.g. `05 марта 2024 г.`.
pub fn format_ru_long_date<Tz: TimeZone>(dt: &DateTime<Tz>) -> String {
    let month = MONTHS_GENITIVE[dt.month0() as usize];
    format!("{:02} {} {} г.", dt.day(), month, dt.year())
}
