/*!

This is the long-form manual for `topsis_scoring` and the `topsis` command
line tool.

## The method

TOPSIS (Technique for Order Preference by Similarity to Ideal Solution)
ranks a set of alternatives, each evaluated on several numeric criteria, by
their relative closeness to an ideal point. The pipeline is:

1. every criteria column is divided by its Euclidean norm;
2. every normalized column is multiplied by the weight of its criterion;
3. two reference vectors are derived from the weighted matrix: the ideal
   best (per column: the maximum for a beneficial criterion, the minimum
   for a cost criterion) and the ideal worst (the other extreme);
4. every row is given its Euclidean distance to both reference vectors;
5. the score of a row is `d_worst / (d_best + d_worst)`, a value in [0, 1]
   where 1 means the row coincides with the ideal best;
6. rank 1 goes to the highest score. Tied scores share a rank and the next
   distinct score skips the tied slots (competition ranking).

Weights express relative importance only: multiplying all of them by the
same positive constant does not change any score.

## Input formats

The following input formats are supported by the command line tool:
* `csv` Comma Separated Values with a header row
* `xlsx` Excel spreadsheets

In both cases the expected table shape is the same: the first row is the
header, the first column is a free-form row identifier which is carried to
the output unchanged, and every other column is a numeric criterion. A
table therefore needs at least 3 columns.

|  Model  | Price | Storage | Camera |
|---------|-------|---------|--------|
| M1      | 250   | 16      | 12     |
| M2      | 200   | 16      | 8      |
| M3      | 300   | 32      | 16     |

## Weights and impacts

Weights and impacts are passed as comma-separated strings with one token
per criteria column, for example `--weights 0.25,0.25,0.5` and
`--impacts -,+,+`. A `+` impact marks a beneficial criterion (higher is
better), a `-` impact marks a cost (lower is better). Whitespace around
tokens is ignored.

## Configuration

Instead of flags, a scoring job can be described in a JSON file passed with
`--config`:

```json
{
    "outputSettings": {
        "jobName": "phone selection",
        "outputPath": "phones_scored.csv"
    },
    "tableSource": {
        "provider": "csv",
        "filePath": "phones.csv"
    },
    "weights": "0.25,0.25,0.25,0.25",
    "impacts": "-,+,+,+"
}
```

Flags given on the command line override the corresponding configuration
entries.

## Output

The output is the input table with two appended columns, `Score` and
`Rank`, in the original row order. It is written as CSV to `--out` (a file
path or the special value `stdout`); without `--out`, the file is written
next to the input as `<name>_scored.csv`.

## Error classes

Every failure is deterministic and reported before any partial output is
produced:

* shape errors: row/column/weight/impact counts that do not line up, or a
  table with fewer than 2 criteria columns;
* parse errors: a weight token or a table cell that is not a finite
  number, or an impact token other than `+`/`-`;
* degenerate inputs: a criteria column that is entirely zero, an all-zero
  weight vector, or a table whose rows are all identical on every weighted
  criterion. These would silently produce NaN or infinite scores if left
  unchecked, so they abort the run instead.

*/
