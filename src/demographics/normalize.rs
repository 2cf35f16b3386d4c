use crate::demographics::row::PlaceRow;
use crate::error::TransformError;

/// ACS 2012 poverty rate in non-metro areas. Stands in for the poverty
/// fractions when a place has no poverty-status-determined population at all,
/// which would otherwise divide zero by zero.
pub const NONMETRO_POVERTY_RATE: f64 = 0.182;

/// One output row of the normalized demographics table. Constructed per input
/// row, written once, never mutated.
#[derive(Debug, Clone)]
pub struct NormalizedPlace {
    pub geo_id: String,
    pub county_id: String,
    pub city: String,
    pub state: String,
    pub population: f64,
    pub male: f64,
    pub female: f64,
    pub white: f64,
    pub hispanic: f64,
    pub black: f64,
    pub asian: f64,
    pub native: f64,
    pub other: f64,
    pub age_brackets: [String; 5],
    pub no_diploma: f64,
    pub high_school: f64,
    pub some_college: f64,
    pub bachelors: f64,
    pub below_poverty: f64,
    pub above_poverty: f64,
}

impl NormalizedPlace {
    /// Column names the simulation's demographics loader expects. CTYNAME and
    /// TOT_POP are county-level fields it ignores; they are emitted empty.
    pub const HEADER: [&'static str; 26] = [
        "", "COUNTY", "NAME", "STNAME", "POPESTIMATE2015", "CTYNAME", "TOT_POP", "TOT_MALE",
        "TOT_FEMALE", "WHITE", "HISPANIC", "BLACK", "ASIAN", "NATIVE", "OTHER", "1", "2", "3",
        "4", "5", "LESS_THAN_HS", "HS_DEGREE", "SOME_COLLEGE", "BS_DEGREE", "00..11", "11..999",
    ];

    /// Serialize in header order.
    pub fn to_record(&self) -> Vec<String> {
        let mut rec = Vec::with_capacity(Self::HEADER.len());
        rec.push(self.geo_id.clone());
        rec.push(self.county_id.clone());
        rec.push(self.city.clone());
        rec.push(self.state.clone());
        rec.push(self.population.to_string());
        rec.push(String::new()); // CTYNAME
        rec.push(String::new()); // TOT_POP
        rec.push(self.male.to_string());
        rec.push(self.female.to_string());
        rec.push(self.white.to_string());
        rec.push(self.hispanic.to_string());
        rec.push(self.black.to_string());
        rec.push(self.asian.to_string());
        rec.push(self.native.to_string());
        rec.push(self.other.to_string());
        rec.extend(self.age_brackets.iter().cloned());
        rec.push(self.no_diploma.to_string());
        rec.push(self.high_school.to_string());
        rec.push(self.some_college.to_string());
        rec.push(self.bachelors.to_string());
        rec.push(self.below_poverty.to_string());
        rec.push(self.above_poverty.to_string());
        rec
    }
}

/// Split `"Abbeville city, Alabama"` into city and state. The last word of
/// the first segment is a locality-type suffix ("city", "town", "CDP", ...)
/// and is dropped.
fn split_place_name(row: usize, name: &str) -> Result<(String, String), TransformError> {
    let mut segments = name.split(',');
    let place = segments.next().unwrap_or_default();
    let state = segments
        .next()
        .ok_or_else(|| TransformError::malformed(row, format!("place name {:?} has no state", name)))?
        .trim()
        .to_string();

    let tokens: Vec<&str> = place.split(' ').collect();
    let city = tokens[..tokens.len() - 1].join(" ");
    Ok((city, state))
}

/// Normalize one source row into the 26-column target shape, or skip it when
/// the place reports no population.
pub fn normalize(row: &PlaceRow) -> Result<Option<NormalizedPlace>, TransformError> {
    let (city, state) = split_place_name(row.row, &row.place_name)?;

    let pop = row.population;
    if pop == 0.0 {
        return Ok(None);
    }

    // race/ethnicity buckets: pacific islanders are grouped with asians,
    // multiracial people with "other"
    let asian = row.asian + row.pacific;
    let other = row.other_single + row.multiracial;

    let (below_poverty, above_poverty) = if row.poverty_determined == 0.0 {
        // complement spelled out: 1.0 - 0.182 does not round-trip to 0.818
        (NONMETRO_POVERTY_RATE, 0.818)
    } else {
        let below = row.below_poverty / row.poverty_determined;
        (below, 1.0 - below)
    };

    Ok(Some(NormalizedPlace {
        geo_id: row.geo_id.clone(),
        county_id: row.county_id.clone(),
        city,
        state,
        population: pop,
        male: row.male / pop,
        female: (pop - row.male) / pop,
        white: row.white / pop,
        hispanic: row.hispanic / pop,
        black: row.black / pop,
        asian: asian / pop,
        native: row.native / pop,
        other: other / pop,
        age_brackets: row.age_brackets.clone(),
        no_diploma: row.no_diploma / pop,
        high_school: row.high_school / pop,
        some_college: row.some_college / pop,
        bachelors: row.bachelors / pop,
        below_poverty,
        above_poverty,
    }))
}
