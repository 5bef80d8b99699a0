use std::time::Duration;

/// The line reported for one measured collaborator, eg. `Python time = 0.0201`.
pub fn time_line(label: &str, elapsed: Duration) -> String {
    format!("{} time = {}", label, elapsed.as_secs_f64())
}

pub fn speedup_line(ratio: f64) -> String {
    format!("Speedup = {}", ratio)
}

/// Human-readable duration with an SI unit, used for diagnostics only.
pub fn time(ns: f64) -> String {
    if ns < 1.0 {
        format!("{:>6} ps", short(ns * 1e3))
    } else if ns < 10f64.powi(3) {
        format!("{:>6} ns", short(ns))
    } else if ns < 10f64.powi(6) {
        format!("{:>6} µs", short(ns / 1e3))
    } else if ns < 10f64.powi(9) {
        format!("{:>6} ms", short(ns / 1e6))
    } else {
        format!("{:>6} s", short(ns / 1e9))
    }
}

pub fn short(n: f64) -> String {
    if n < 10.0 {
        format!("{:.4}", n)
    } else if n < 100.0 {
        format!("{:.3}", n)
    } else if n < 1000.0 {
        format!("{:.2}", n)
    } else if n < 10000.0 {
        format!("{:.1}", n)
    } else {
        format!("{:.0}", n)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn short_max_len() {
        let mut float = 1.0;
        while float < 999_999.9 {
            let string = short(float);
            println!("{}", string);
            assert!(string.len() <= 6);
            float *= 2.0;
        }
    }

    #[test]
    fn time_picks_unit_by_magnitude() {
        assert_eq!(time(0.5), "500.00 ps");
        assert_eq!(time(20.0e6), "20.000 ms");
        assert_eq!(time(1.5e9), "1.5000 s");
    }

    #[test]
    fn time_of_collaborator_calls() {
        let nanos = |d: Duration| d.as_nanos() as f64;
        assert_eq!(time(nanos(Duration::from_millis(20))), "20.000 ms");
        assert_eq!(time(nanos(Duration::from_micros(1250))), "1.2500 ms");
        assert_eq!(time(nanos(Duration::from_micros(350))), "350.00 µs");
        assert_eq!(time(nanos(Duration::from_secs(12))), "12.000 s");
    }

    #[test]
    fn report_lines() {
        assert_eq!(
            time_line("Python", Duration::from_millis(20)),
            "Python time = 0.02"
        );
        assert_eq!(time_line("Cython", Duration::from_secs(0)), "Cython time = 0");
        assert_eq!(speedup_line(2.0), "Speedup = 2");
        assert_eq!(speedup_line(12.5), "Speedup = 12.5");
    }
}
