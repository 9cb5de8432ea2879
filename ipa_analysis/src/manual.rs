/*!

This is the long-form manual for `ipa_analysis` and `esg-ipa`.

## The analysis

Importance-Performance Analysis (IPA) places every survey item on a two-axis
grid: how important the respondents consider the item, and how well the
organization performs on it. The grid is cut in four by the mean importance and
the mean performance of all the items:

|                     | performance < mean | performance >= mean |
|---------------------|--------------------|---------------------|
| importance >= mean  | Improve first      | Retain              |
| importance < mean   | Low priority       | Overinvested        |

An item whose value is exactly the mean counts as high on that axis. In
particular, a dataset in which all the items have the same ratings is entirely
classified as `Retain`.

The means are always computed from the full dataset being analyzed. Adding or
removing a single item may move an item from one quadrant to another.

The groups are presented in this order: `Improve first`, `Retain`,
`Overinvested`, `Low priority`. The means reported for each group only use the
members of that group.

## Input formats

The following formats are supported:
* `csv` Comma Separated Values, with a header line
* `xlsx` Excel workbooks

In both cases the first row is the header. Three columns are used: the item
identifier, the importance and the performance. Their names default to `Item`,
`Importance` and `Performance` and can be changed with the
`--item-column`, `--importance-column` and `--performance-column` flags.
Other columns are ignored.

Rows in which the three columns are blank are skipped. Any other row must have
an identifier and two numbers, otherwise the run stops and the line is reported.

### `xlsx`

If the workbook has a single worksheet, it is used. Otherwise the name of the
worksheet must be given with `--excel-worksheet-name`.

## Outputs

* `--out` a summary in JSON format: means, classified items, strategy groups
* `--export` the classified items in CSV format, with the columns
  `Item, Importance, Performance, Strategy, Recommendation`
* `--chart` the specification of the scatter plot and the radar chart, in JSON.
  The scatter plot has the performance on the horizontal axis and the importance
  on the vertical axis, with one dashed line for each mean.

A text report is always printed on the standard output.

## Item codes

Item codes such as `E1` or `S12` are resolved into a description with a
glossary file given with `--glossary`. It is either a JSON object mapping codes
to descriptions or a CSV file with the columns `Code` and `Description`.
The first letter of the code is also used to find the ESG pillar
(`E`nvironmental, `S`ocial, `G`overnance). The glossary is only used for display.

## Configuration

All the options can also be stored in a JSON file passed with `--config`:

```json
{
  "outputSettings": {
    "analysisTitle": "ESG survey 2024",
    "surveyDate": "2024-05-01",
    "organization": "ACME"
  },
  "inputSource": {
    "provider": "xlsx",
    "filePath": "survey.xlsx",
    "excelWorksheetName": "Sheet1",
    "itemColumn": "Code",
    "importanceColumn": "Importance",
    "performanceColumn": "Performance"
  },
  "glossaryPath": "glossary.json"
}
```

Paths are relative to the directory of the configuration file. The command line
flags take precedence over the configuration file.

*/
