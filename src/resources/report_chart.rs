// This file is part of the terraform-provider-fortios project
//
// Copyright (C) ANEO, 2024-2024. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License")
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::mapping::{Field, Identity, ResourceDef};

const LABEL_ANGLE: &[&str] = &["45-degree", "vertical", "horizontal"];
const YES_NO: &[&str] = &["yes", "no"];

static X_SERIES: &[Field] = &[
    Field::string("databind").max_len(511).describe("X-series value expression"),
    Field::string("caption").max_len(127),
    Field::integer("caption_font_size").range(0, 4294967295),
    Field::integer("font_size").range(0, 4294967295),
    Field::string("label_angle").one_of(LABEL_ANGLE),
    Field::string("is_category").one_of(YES_NO),
    Field::string("scale_unit").one_of(&["minute", "hour", "day", "month", "year"]),
    Field::integer("scale_step").range(0, 4294967295),
    Field::string("scale_direction").one_of(&["decrease", "increase"]),
    Field::string("scale_format").one_of(&[
        "YYYY-MM-DD-HH-MM",
        "YYYY-MM-DD HH",
        "YYYY-MM-DD",
        "YYYY-MM",
        "YYYY",
        "HH-MM",
        "MM-DD",
    ]),
    Field::string("unit").max_len(35),
];

static Y_SERIES: &[Field] = &[
    Field::string("databind").max_len(511).describe("Y-series value expression"),
    Field::string("caption").max_len(127),
    Field::integer("caption_font_size").range(0, 4294967295),
    Field::integer("font_size").range(0, 4294967295),
    Field::string("label_angle").one_of(LABEL_ANGLE),
    Field::string("group").max_len(63),
    Field::string("unit").max_len(35),
    Field::string("extra_y").one_of(&["enable", "disable"]),
    Field::string("extra_databind").max_len(511),
    Field::string("y_legend").max_len(63),
    Field::string("extra_y_legend").max_len(63),
];

static CATEGORY_SERIES: &[Field] = &[
    Field::string("databind").max_len(511),
    Field::integer("font_size").range(0, 4294967295),
];

static VALUE_SERIES: &[Field] = &[Field::string("databind").max_len(511)];

static DRILL_DOWN_CHARTS: &[Field] = &[
    Field::integer("id").range(0, 4294967295),
    Field::string("chart_name").max_len(71).describe("Drill down chart name"),
    Field::toggle("status"),
];

static MAPPING: &[Field] = &[
    Field::integer("id").range(0, 4294967295),
    Field::string("op")
        .one_of(&["none", "greater", "greater-equal", "less", "less-equal", "equal", "between"]),
    Field::string("value_type").one_of(&["integer", "string"]),
    Field::string("value1").max_len(255),
    Field::string("value2").max_len(255),
    Field::string("displayname").max_len(127),
];

static COLUMN: &[Field] = &[
    Field::integer("id").range(0, 4294967295),
    Field::string("header_value").max_len(255),
    Field::string("detail_value").max_len(255),
    Field::string("footer_value").max_len(255),
    Field::string("detail_unit").max_len(35),
    Field::string("footer_unit").max_len(35),
    Field::table("mapping", "id", MAPPING)
        .describe("Show detail in certain display value for certain condition"),
];

static FIELDS: &[Field] = &[
    Field::string("name").max_len(71).required().describe("Chart Widget Name"),
    Field::integer("policy").range(0, 4294967295),
    Field::string("type").one_of(&["graph", "table"]).describe("Chart type"),
    Field::string("period").one_of(&["last24h", "last7d"]),
    Field::string("comments").max_len(1023).required(),
    Field::string("dataset").max_len(63).required().describe("Bind dataset to chart"),
    Field::string("category").one_of(&[
        "misc",
        "traffic",
        "event",
        "virus",
        "webfilter",
        "attack",
        "spam",
        "dlp",
        "app-ctrl",
        "vulnerability",
    ]),
    Field::string("favorite").one_of(YES_NO),
    Field::string("graph_type").one_of(&["none", "bar", "pie", "line", "flow"]),
    Field::string("style").one_of(&["auto", "manual"]),
    Field::string("dimension").one_of(&["2D", "3D"]),
    Field::string("title").max_len(127),
    Field::integer("title_font_size").range(0, 4294967295),
    Field::string("background").max_len(11),
    Field::string("color_palette").max_len(11),
    Field::toggle("legend"),
    Field::integer("legend_font_size").range(0, 4294967295),
    Field::block("x_series", X_SERIES).describe("X-series of chart"),
    Field::block("y_series", Y_SERIES).describe("Y-series of chart"),
    Field::block("category_series", CATEGORY_SERIES).describe("Category series of pie chart"),
    Field::block("value_series", VALUE_SERIES).describe("Value series of pie chart"),
    Field::table("drill_down_charts", "id", DRILL_DOWN_CHARTS).describe("Drill down charts"),
    Field::table("column", "id", COLUMN).describe("Table column definition"),
];

pub static REPORT_CHART: ResourceDef = ResourceDef {
    type_name: "report_chart",
    path: "report/chart",
    label: "ReportChart",
    identity: Identity::Mkey("name"),
    description: "Report chart widget configuration",
    fields: FIELDS,
};
