/*!

# Quick start

This example walks through ranking a handful of phone models with the
`topsis` command line tool.

**Preparing the data** Collect the alternatives in a CSV file with a header
row. The first column is the name of the alternative, every other column is
a numeric criterion. Save the following as `phones.csv`:

```text
Model,Price,Storage,Camera,Looks
M1,250,16,12,5
M2,200,16,8,3
M3,300,32,16,4
M4,275,32,8,4
M5,225,16,16,2
```

**Choosing weights and impacts** Each criterion needs a weight (its
relative importance) and an impact: `+` if more is better, `-` if less is
better. Here the price is a cost and everything else is beneficial, with
equal importance:

```bash
topsis -i phones.csv --weights 0.25,0.25,0.25,0.25 --impacts -,+,+,+ --out stdout
```

The tool prints the input table with the score and rank columns appended:

```text
Model,Price,Storage,Camera,Looks,Score,Rank
M1,250,16,12,5,0.53428,3
M2,200,16,8,3,0.30837,5
M3,300,32,16,4,0.69163,1
M4,275,32,8,4,0.53474,2
M5,225,16,16,2,0.40105,4
```

`M3` is the preferred model: it is the closest to the ideal best point and
the furthest from the ideal worst point under these weights.

**Writing to a file** Without `--out`, the result is written next to the
input as `phones_scored.csv`. Passing `--out result.csv` selects the
destination explicitly.

**Going further**

- the [manual](super::manual) describes the input formats, the JSON job
  configuration and the error classes;
- programmatic callers can skip the CSV surface entirely and use
  [Builder](crate::Builder) or
  [run_topsis_scoring](crate::run_topsis_scoring) directly.

*/
