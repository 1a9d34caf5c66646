#![allow(dead_code)]

use std::fs;
use std::path::Path;

/// A saved copy of the national weather thresholds page.
///
/// Body rows (after the header): markers at 0, 5, 9 and 14; 17 rows total.
pub const THRESHOLDS_HTML: &str = r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Weather Thresholds</title></head>
<body>
<h1>Weather Thresholds</h1>
<p>The following table defines Weather thresholds used to determine the classification of
Weather as Normal, Alert, Adverse or Extreme.</p>
<table class="confluenceTable">
  <tbody>
    <tr>
      <th>Classification</th><th>Normal</th><th>Alert</th><th>Adverse</th><th>Extreme</th>
    </tr>
    <tr><td>Temperature ( oC )</td><td></td><td></td><td></td><td></td></tr>
    <tr>
      <td>Maximum air temperature ( oC )</td>
      <td>up to 24</td><td>24 &lt; T &#8804; 28</td><td>28 &lt; T &#8804; 32</td><td>T &#8805; 32</td>
    </tr>
    <tr>
      <td>Minimum air temperature ( oC )</td>
      <td>up to 0</td><td>-3 &#8804; T &lt; 0</td><td>-7 &#8804; T &lt; -3</td><td>T &#8804; -7</td>
    </tr>
    <tr>
      <td>Maximum rail temperature ( oC )</td>
      <td>up to 36</td><td>36 &lt; T &#8804; 42</td><td>42 &lt; T &#8804; 46</td><td>T &#8805; 46</td>
    </tr>
    <tr>
      <td>Daily temperature range ( oC )</td>
      <td>up to 10</td><td>10 &lt; T &#8804; 15</td><td>15 &lt; T &#8804; 20</td><td>T &#8805; 20</td>
    </tr>
    <tr><td>Snow</td><td>&nbsp;</td><td></td><td></td><td></td></tr>
    <tr>
      <td>Snow&nbsp;depth, x (cm)</td>
      <td>up to 2</td><td>2 &lt; x &#8804; 5</td><td>5 &lt; x &#8804; 10</td><td>x &#8805; 10</td>
    </tr>
    <tr>
      <td>Fresh snowfall in 24 hours, x (cm)</td>
      <td>up to 1</td><td>1 &lt; x &#8804; 3</td><td>3 &lt; x &#8804; 8</td><td>x &#8805; 8</td>
    </tr>
    <tr>
      <td>Drifting snow depth, x (cm)</td>
      <td>up to 5</td><td>5 &lt; x &#8804; 10</td><td>10 &lt; x &#8804; 20</td><td>x &#8805; 20</td>
    </tr>
    <tr><td>Rainfall</td><td></td><td></td><td></td><td></td></tr>
    <tr>
      <td>Hourly rainfall, r (mm)</td>
      <td>up to 10</td><td>10 &lt; r &#8804; 15</td><td>15 &lt; r &#8804; 25</td><td>r &#8805; 25</td>
    </tr>
    <tr>
      <td>Daily rainfall, r (mm)</td>
      <td>up to 20</td><td>20 &lt; r &#8804; 30</td><td>30 &lt; r &#8804; 50</td><td>r &#8805; 50</td>
    </tr>
    <tr>
      <td>Three-day rainfall, r (mm)</td>
      <td>up to 40</td><td>40 &lt; r &#8804; 60</td><td>60 &lt; r &#8804; 100</td><td>r &#8805; 100</td>
    </tr>
    <tr>
      <td>Monthly rainfall, r (mm)</td>
      <td>up to 120</td><td>120 &lt; r &#8804; 160</td><td>160 &lt; r &#8804; 200</td><td>r &#8805; 200</td>
    </tr>
    <tr><td colspan="5">Wind (mph)</td></tr>
    <tr>
      <td>Mean wind speed, w (mph)</td>
      <td>up to 30</td><td>30 &lt; w &#8804; 40</td><td>40 &lt; w &#8804; 50</td><td>w &#8805; 50</td>
    </tr>
    <tr>
      <td>Gust speed (mph)</td>
      <td>up to 50</td><td>50 &lt; w &#8804; 60</td><td>60 &lt; w &#8804; 70</td><td>w &#8805; 70</td>
    </tr>
  </tbody>
</table>
<p>These are national thresholds. Route-specific thresholds may also be defined at some point.</p>
</body>
</html>
"#;

/// Number of data rows in `THRESHOLDS_HTML`.
pub const THRESHOLD_ROWS: usize = 13;

pub fn write_file(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}
