use almanac::{
    next_eclipse, seasonal_markers, AlmanacConfig, DaylightSummary, GeographicLocation,
    Hemisphere, MoonSummary,
};
use chrono::Local;

fn hhmm(hours: Option<f64>) -> String {
    match hours {
        Some(h) => {
            let minutes = (h * 60.0).round() as i64;
            format!("{:02}:{:02}", minutes / 60 % 24, minutes % 60)
        }
        None => "--:--".to_string(),
    }
}

fn main() -> Result<(), almanac::AlmanacError> {
    let config = AlmanacConfig::default();
    let here = GeographicLocation::new(59.66, 13.0)?;
    let now = Local::now();

    let day = DaylightSummary::compute(&now, &here);
    println!(
        "sunrise {}  sunset {}  daylight {:.1} h  now: {} (sun {:.1}°)",
        hhmm(day.sunrise_hour),
        hhmm(day.sunset_hour),
        day.daylight_hours,
        day.phase,
        day.sun_altitude
    );
    println!(
        "civil {} to {}  nautical {} to {}",
        hhmm(day.civil_dawn_hour),
        hhmm(day.civil_dusk_hour),
        hhmm(day.nautical_dawn_hour),
        hhmm(day.nautical_dusk_hour)
    );

    let moon = MoonSummary::compute(&now, &here, &config.rise_set);
    println!(
        "moonrise {} (az {:.0?})  moonset {} (az {:.0?})",
        hhmm(moon.moonrise_hour),
        moon.rise_azimuth,
        hhmm(moon.moonset_hour),
        moon.set_azimuth
    );
    println!(
        "moon: {} ({:.0}% lit), full in {:.1} days, perigee in {:.1} days",
        moon.phase.name,
        moon.phase.illumination * 100.0,
        moon.phase.days_to_full_moon,
        moon.apsis.days_to_perigee
    );

    match next_eclipse(&now, &config.eclipse) {
        Ok(eclipse) => println!(
            "next: {} eclipse, magnitude {:.2}, peak {}",
            eclipse.kind, eclipse.magnitude, eclipse.peak
        ),
        Err(err) => println!("{err}"),
    }

    for marker in seasonal_markers(now.date_naive(), Hemisphere::of(&here), &config.seasons) {
        println!("{} in {} days", marker.marker, marker.days);
    }
    Ok(())
}
