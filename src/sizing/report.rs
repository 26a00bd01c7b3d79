use std::fmt;

use crate::loads::LoadList;

use super::types::{CashFlow, ConsumptionSummary, Evaluation, SystemSizing};

/// Formats an amount as whole Rupiah with `.` thousands separators.
pub fn format_rupiah(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    if rounded < 0.0 {
        format!("-Rp {grouped}")
    } else {
        format!("Rp {grouped}")
    }
}

/// Tabular view of a load list with per-line energy.
pub struct LoadTable<'a>(pub &'a LoadList);

impl fmt::Display for LoadTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Loads ---")?;
        writeln!(
            f,
            "{:<24} {:>9} {:>5} {:>8} {:>12} {:>10}",
            "Appliance", "Power W", "Qty", "h/day", "Wh/day", "kWh/day"
        )?;
        for l in self.0 {
            writeln!(
                f,
                "{:<24} {:>9.1} {:>5} {:>8.1} {:>12.1} {:>10.3}",
                l.name,
                l.power_w,
                l.quantity,
                l.hours_per_day,
                l.daily_wh(),
                l.daily_wh() / 1000.0
            )?;
        }
        write!(f, "{} load(s)", self.0.len())
    }
}

impl fmt::Display for ConsumptionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Energy Consumption ---")?;
        writeln!(f, "Daily:                 {:.2} kWh", self.daily_kwh)?;
        writeln!(f, "Monthly:               {:.2} kWh", self.monthly_kwh)?;
        writeln!(f, "Yearly:                {:.2} kWh", self.yearly_kwh)?;
        writeln!(f, "Peak load:             {:.0} W", self.peak_w)?;
        writeln!(f)?;
        writeln!(f, "--- Utility Cost ---")?;
        writeln!(f, "Daily:                 {}", format_rupiah(self.daily_cost))?;
        writeln!(f, "Monthly:               {}", format_rupiah(self.monthly_cost))?;
        write!(f, "Yearly:                {}", format_rupiah(self.yearly_cost))
    }
}

impl fmt::Display for SystemSizing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Recommended System ---")?;
        writeln!(
            f,
            "Panels:                {} x {:.0} Wp ({:.0} Wp installed, {:.1} Wp required)",
            self.panel.count, self.panel.unit_wp, self.panel.array_wp, self.panel.required_wp
        )?;
        match &self.battery {
            Some(b) => writeln!(
                f,
                "Batteries:             {} unit(s) ({}S{}P, {:.0} Wh / {:.1} Ah required at {:.0}% DoD)",
                b.units,
                b.series,
                b.parallel,
                b.required_wh,
                b.required_ah,
                b.effective_dod * 100.0
            )?,
            None => writeln!(f, "Batteries:             none")?,
        }
        writeln!(
            f,
            "Inverter:              {} unit(s), >= {:.0} W",
            self.inverter.units, self.inverter.required_w
        )?;
        if self.controller.builtin {
            writeln!(
                f,
                "Charge controller:     built into inverter (>= {:.0} A)",
                self.controller.required_a
            )?;
        } else {
            writeln!(
                f,
                "Charge controller:     {} unit(s), >= {:.0} A",
                self.controller.units, self.controller.required_a
            )?;
        }
        writeln!(f)?;

        let inv = &self.investment;
        writeln!(f, "--- Investment ---")?;
        writeln!(f, "Panels:                {}", format_rupiah(inv.panel))?;
        writeln!(f, "Batteries:             {}", format_rupiah(inv.battery))?;
        writeln!(f, "Inverter:              {}", format_rupiah(inv.inverter))?;
        writeln!(f, "Charge controller:     {}", format_rupiah(inv.controller))?;
        writeln!(f, "Installation:          {}", format_rupiah(inv.installation))?;
        writeln!(f, "Total investment:      {}", format_rupiah(inv.total))?;
        writeln!(f)?;

        writeln!(f, "--- Payback ---")?;
        match self.payback_years {
            Some(years) => write!(f, "Payback period:        {years:.1} years")?,
            None => write!(f, "Payback period:        not applicable")?,
        }
        if let Some(cf) = &self.cash_flow {
            write!(f, "\n\n{cf}")?;
        }
        Ok(())
    }
}

impl fmt::Display for CashFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Cash Flow ---")?;
        writeln!(f, "{:>4} {:>20} {:>22}", "Year", "Saving", "Cumulative")?;
        for p in &self.points {
            writeln!(
                f,
                "{:>4} {:>20} {:>22}",
                p.year,
                format_rupiah(p.saving),
                format_rupiah(p.cumulative)
            )?;
        }
        match self.break_even_year {
            Some(year) => write!(f, "Break-even year:       {year}"),
            None => write!(f, "Break-even year:       beyond projection"),
        }
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "System type:           {}", self.kind)?;
        writeln!(f)?;
        write!(f, "{}", self.consumption)?;
        match &self.sizing {
            Some(sizing) => write!(f, "\n\n{sizing}"),
            None => write!(f, "\n\nNo loads entered; add loads to size a system."),
        }
    }
}
