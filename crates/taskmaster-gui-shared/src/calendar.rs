use chrono::{
  Datelike,
  Months,
  NaiveDate,
  Weekday
};

pub fn first_of_month(
  date: NaiveDate
) -> NaiveDate {
  date.with_day(1).unwrap_or(date)
}

pub fn shift_month(
  month: NaiveDate,
  delta: i32
) -> NaiveDate {
  let first = first_of_month(month);
  let step = Months::new(delta.unsigned_abs());
  let shifted = if delta >= 0 {
    first.checked_add_months(step)
  } else {
    first.checked_sub_months(step)
  };
  shifted.unwrap_or(first)
}

pub fn parse_week_start(
  raw: &str
) -> Weekday {
  match raw
    .trim()
    .to_ascii_lowercase()
    .as_str()
  {
    | "sunday" | "sun" => Weekday::Sun,
    | "saturday" | "sat" => {
      Weekday::Sat
    }
    | _ => Weekday::Mon
  }
}

pub fn weekday_labels(
  week_start: Weekday
) -> Vec<&'static str> {
  let mut day = week_start;
  let mut labels = Vec::with_capacity(7);
  for _ in 0..7 {
    labels.push(match day {
      | Weekday::Mon => "Mo",
      | Weekday::Tue => "Tu",
      | Weekday::Wed => "We",
      | Weekday::Thu => "Th",
      | Weekday::Fri => "Fr",
      | Weekday::Sat => "Sa",
      | Weekday::Sun => "Su"
    });
    day = day.succ();
  }
  labels
}

/// Rows of seven cells covering `month`.
/// Cells outside the month are `None`.
pub fn month_grid(
  month: NaiveDate,
  week_start: Weekday
) -> Vec<[Option<NaiveDate>; 7]> {
  let first = first_of_month(month);
  let lead = ((first
    .weekday()
    .num_days_from_monday()
    + 7
    - week_start.num_days_from_monday())
    % 7) as usize;

  let mut rows = Vec::new();
  let mut row = [None; 7];
  let mut col = lead;
  let mut day = Some(first);

  while let Some(date) = day {
    if date.month() != first.month() {
      break;
    }
    row[col] = Some(date);
    col += 1;
    if col == 7 {
      rows.push(row);
      row = [None; 7];
      col = 0;
    }
    day = date.succ_opt();
  }

  if col > 0 {
    rows.push(row);
  }
  rows
}
