pub mod a001_sale_row_images;
